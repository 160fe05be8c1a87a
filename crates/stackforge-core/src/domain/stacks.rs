//! Stack profile registry.
//!
//! Each supported backend or frontend technology is described exactly once
//! by a profile: the aliases it answers to, the files generated for it, and
//! the comment syntax used for failure markers. Everything downstream
//! (prompt building, file naming, the `stacks` listing) reads these tables.
//!
//! # Adding a New Stack
//!
//! 1. Add one [`BackendStack`] or [`FrontendStack`] entry below
//! 2. Nothing else changes; prompts, file names and listings follow

use serde::Serialize;
use tracing::warn;

// ── Backend ──────────────────────────────────────────────────────────────────

/// Files and syntax for one backend technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendStack {
    /// Display name.
    pub name: &'static str,

    /// Normalised spellings this stack answers to (see [`normalize_tech`]).
    pub aliases: &'static [&'static str],

    /// Implementation language, used in prompts.
    pub language: &'static str,

    /// Application entry point, generated first.
    pub entry_file: &'static str,

    /// Data-model file, generated second.
    pub models_file: &'static str,

    /// Line-comment prefix for failure markers.
    pub comment: &'static str,
}

/// Single source of truth for backend stacks. The first entry is the
/// fallback for unrecognised technologies.
pub static BACKEND_STACKS: &[BackendStack] = &[
    BackendStack {
        name: "FastAPI",
        aliases: &["fastapi", "flask", "django", "python"],
        language: "Python",
        entry_file: "main.py",
        models_file: "models.py",
        comment: "#",
    },
    BackendStack {
        name: "Express",
        aliases: &["express", "expressjs", "nestjs", "koa", "node", "nodejs"],
        language: "JavaScript",
        entry_file: "server.js",
        models_file: "models.js",
        comment: "//",
    },
    BackendStack {
        name: "Axum",
        aliases: &["axum", "actix", "actixweb", "rocket", "rust"],
        language: "Rust",
        entry_file: "main.rs",
        models_file: "models.rs",
        comment: "//",
    },
    BackendStack {
        name: "Gin",
        aliases: &["gin", "echo", "fiber", "go", "golang"],
        language: "Go",
        entry_file: "main.go",
        models_file: "models.go",
        comment: "//",
    },
];

// ── Frontend ─────────────────────────────────────────────────────────────────

/// Files and syntax for one frontend technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrontendStack {
    pub name: &'static str,
    pub aliases: &'static [&'static str],

    /// Landing page, relative to the frontend root. Lives under `pages/`.
    pub landing_file: &'static str,

    pub comment: &'static str,
}

/// Single source of truth for frontend stacks. The first entry is the
/// fallback for unrecognised technologies.
pub static FRONTEND_STACKS: &[FrontendStack] = &[
    FrontendStack {
        name: "Next.js",
        aliases: &["nextjs", "next", "react", "reactjs"],
        landing_file: "pages/index.js",
        comment: "//",
    },
    FrontendStack {
        name: "Vue",
        aliases: &["vue", "vuejs", "nuxt", "nuxtjs"],
        landing_file: "pages/index.vue",
        comment: "//",
    },
    FrontendStack {
        name: "Svelte",
        aliases: &["svelte", "sveltekit"],
        landing_file: "pages/index.svelte",
        comment: "//",
    },
];

// ── Lookup ───────────────────────────────────────────────────────────────────

/// Lowercase and drop separators so `Next.js`, `next-js` and `NextJS` agree.
pub fn normalize_tech(tech: &str) -> String {
    tech.chars()
        .filter(|c| !matches!(c, '.' | '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn find_backend(tech: &str) -> Option<&'static BackendStack> {
    let key = normalize_tech(tech);
    BACKEND_STACKS.iter().find(|s| s.aliases.contains(&key.as_str()))
}

pub fn find_frontend(tech: &str) -> Option<&'static FrontendStack> {
    let key = normalize_tech(tech);
    FRONTEND_STACKS
        .iter()
        .find(|s| s.aliases.contains(&key.as_str()))
}

/// Like [`find_backend`], but falls back to the first profile.
pub fn resolve_backend(tech: &str) -> &'static BackendStack {
    find_backend(tech).unwrap_or_else(|| {
        let fallback = &BACKEND_STACKS[0];
        warn!(
            tech,
            fallback = fallback.name,
            "Unrecognised backend technology, using fallback file layout"
        );
        fallback
    })
}

/// Like [`find_frontend`], but falls back to the first profile.
pub fn resolve_frontend(tech: &str) -> &'static FrontendStack {
    find_frontend(tech).unwrap_or_else(|| {
        let fallback = &FRONTEND_STACKS[0];
        warn!(
            tech,
            fallback = fallback.name,
            "Unrecognised frontend technology, using fallback file layout"
        );
        fallback
    })
}
