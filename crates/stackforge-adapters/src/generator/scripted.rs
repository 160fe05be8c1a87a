//! Scripted text generator for tests and offline runs.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use stackforge_core::application::ports::{GenerationError, TextGenerator};

/// Replays queued responses in order and records every prompt.
///
/// Once the queue is drained it answers with the fallback, or with a
/// transport error if none was set. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    responses: VecDeque<Result<String, GenerationError>>,
    fallback: Option<Result<String, GenerationError>>,
    prompts: Vec<String>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that answers every prompt with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self::new().with_fallback(text)
    }

    /// Generator that fails every prompt with `error`.
    pub fn failing(error: GenerationError) -> Self {
        let generator = Self::new();
        generator.with_inner(|inner| inner.fallback = Some(Err(error)));
        generator
    }

    pub fn with_fallback(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with_inner(|inner| inner.fallback = Some(Ok(text)));
        self
    }

    pub fn push_ok(&self, text: impl Into<String>) -> &Self {
        let text = text.into();
        self.with_inner(|inner| inner.responses.push_back(Ok(text)));
        self
    }

    pub fn push_err(&self, error: GenerationError) -> &Self {
        self.with_inner(|inner| inner.responses.push_back(Err(error)));
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.prompts.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.responses.len())
            .unwrap_or_default()
    }

    fn with_inner(&self, f: impl FnOnce(&mut ScriptedInner)) {
        if let Ok(mut inner) = self.inner.lock() {
            f(&mut inner);
        }
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| GenerationError::Transport("scripted generator poisoned".into()))?;

        inner.prompts.push(prompt.to_string());

        match inner.responses.pop_front() {
            Some(response) => response,
            None => inner.fallback.clone().unwrap_or_else(|| {
                Err(GenerationError::Transport(
                    "no scripted response left".into(),
                ))
            }),
        }
    }
}
