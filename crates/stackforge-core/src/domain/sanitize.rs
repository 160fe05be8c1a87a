//! Fence stripping for generated content.
//!
//! Generative endpoints tend to wrap code in Markdown fences. Only a
//! recognised opening fence line and a trailing bare fence are removed,
//! plus outer whitespace; interior text is never touched.

const FENCE: &str = "```";

/// Language tags accepted on an opening fence for backend files.
pub const BACKEND_FENCE_TAGS: &[&str] = &[
    "python",
    "py",
    "javascript",
    "js",
    "typescript",
    "ts",
    "rust",
    "rs",
    "go",
    "golang",
];

/// Language tags accepted on an opening fence for frontend files.
pub const FRONTEND_FENCE_TAGS: &[&str] = &[
    "jsx",
    "tsx",
    "javascript",
    "js",
    "typescript",
    "ts",
    "vue",
    "svelte",
    "html",
];

/// Strip a fenced-code wrapper whose tag is bare or listed in `tags`.
///
/// Content that does not open with a recognised fence is only trimmed.
pub fn strip_fences(content: &str, tags: &[&str]) -> String {
    let trimmed = content.trim();

    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed.to_owned();
    };

    let (tag, body) = match rest.find('\n') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, ""),
    };

    let tag = tag.trim();
    if !tag.is_empty() && !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
        return trimmed.to_owned();
    }

    let body = body.trim_end();
    let body = body.strip_suffix(FENCE).unwrap_or(body);
    body.trim().to_owned()
}

pub fn strip_backend_fences(content: &str) -> String {
    strip_fences(content, BACKEND_FENCE_TAGS)
}

pub fn strip_frontend_fences(content: &str) -> String {
    strip_fences(content, FRONTEND_FENCE_TAGS)
}
