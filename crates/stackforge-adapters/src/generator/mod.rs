//! Text generator adapters.

pub mod gemini;
mod scripted;

pub use gemini::{ApiKey, GeminiConfig, GeminiGenerator};
pub use scripted::ScriptedGenerator;
