//! Prompt construction.
//!
//! One prompt per generated file. The order of the returned prompts is the
//! order in which files are generated and appended to a package.

use std::fmt;

use serde::Serialize;

use crate::domain::stacks::{BackendStack, FrontendStack};

/// What a generated file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileRole {
    EntryPoint,
    DataModel,
    LandingPage,
}

impl FileRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EntryPoint => "entry-point",
            Self::DataModel => "data-model",
            Self::LandingPage => "landing-page",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prompt bound to the file its answer becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePrompt {
    pub role: FileRole,
    pub file_name: &'static str,
    pub comment: &'static str,
    pub text: String,
}

/// Prompts for the backend tier: entry point, then data model.
///
/// `tech` is the user's spelling and is quoted verbatim; `stack` only
/// decides file names and language.
pub fn backend_prompts(stack: &BackendStack, tech: &str, description: &str) -> Vec<FilePrompt> {
    vec![
        FilePrompt {
            role: FileRole::EntryPoint,
            file_name: stack.entry_file,
            comment: stack.comment,
            text: format!(
                "Generate a complete {tech} application entry point ({file}, written in {lang}) \
                 for the following application: {description}. \
                 Include application setup and CRUD routes for the main resources. \
                 Return only the source code.",
                file = stack.entry_file,
                lang = stack.language,
            ),
        },
        FilePrompt {
            role: FileRole::DataModel,
            file_name: stack.models_file,
            comment: stack.comment,
            text: format!(
                "Generate the {tech} data models ({file}, written in {lang}) \
                 for the following application: {description}. \
                 Return only the source code.",
                file = stack.models_file,
                lang = stack.language,
            ),
        },
    ]
}

/// Prompts for the frontend tier: the landing page.
pub fn frontend_prompts(stack: &FrontendStack, tech: &str, description: &str) -> Vec<FilePrompt> {
    vec![FilePrompt {
        role: FileRole::LandingPage,
        file_name: stack.landing_file,
        comment: stack.comment,
        text: format!(
            "Generate a {tech} landing page component ({file}) \
             for the following application: {description}. \
             It should introduce the app and link to its main features. \
             Return only the source code.",
            file = stack.landing_file,
        ),
    }]
}
