//! Generation client - one paced, failure-contained call per prompt.
//!
//! The client never returns an error. A failed call becomes
//! [`GenerationResult::Failure`], and every call, whatever its outcome, is
//! followed by exactly one pause on the injected [`Pacer`]. There is no
//! retry and no queue.

use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::application::ports::{Pacer, TextGenerator};

/// Text embedded in degraded content so failures stay detectable on disk.
pub const FAILURE_MARKER: &str = "GENERATION FAILED";

/// Outcome of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success(String),
    Failure(String),
}

impl GenerationResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Turn the result into file content.
    ///
    /// Success text is returned verbatim. A failure becomes a one-line
    /// comment (using `comment` as the line-comment prefix) naming the
    /// reason.
    pub fn into_content(self, comment: &str) -> String {
        match self {
            Self::Success(text) => text,
            Self::Failure(reason) => degraded_content(comment, &reason),
        }
    }
}

/// Body written in place of a failed generation.
pub fn degraded_content(comment: &str, reason: &str) -> String {
    format!("{comment} {FAILURE_MARKER}: {reason}\n")
}

/// Wraps a [`TextGenerator`] with fixed pacing and failure containment.
pub struct GenerationClient {
    generator: Box<dyn TextGenerator>,
    pacer: Box<dyn Pacer>,
    calls: usize,
    failures: usize,
}

impl GenerationClient {
    pub fn new(generator: Box<dyn TextGenerator>, pacer: Box<dyn Pacer>) -> Self {
        Self {
            generator,
            pacer,
            calls: 0,
            failures: 0,
        }
    }

    /// Send `prompt` to the generator, then pause.
    #[instrument(skip_all, fields(call = self.calls + 1, prompt_len = prompt.len()))]
    pub fn generate(&mut self, prompt: &str) -> GenerationResult {
        self.calls += 1;
        let started = Instant::now();

        let result = match self.generator.generate(prompt) {
            Ok(text) => {
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    chars = text.len(),
                    "Generation succeeded"
                );
                GenerationResult::Success(text)
            }
            Err(e) => {
                self.failures += 1;
                warn!(
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Generation failed, substituting degraded content"
                );
                GenerationResult::Failure(e.to_string())
            }
        };

        self.pacer.pause();
        result
    }

    /// Number of calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Number of calls that degraded.
    pub fn failures(&self) -> usize {
        self.failures
    }
}
