use crate::models::prompt::SavedPrompt;
use thiserror::Error;

/// Errors surfaced to the presentation layer. None of them are fatal.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Bad input from the caller. The operation was aborted and nothing changed.
    #[error("{0}")]
    Validation(String),

    /// The saved-prompts slot could not be read or written. After a failed
    /// write the in-memory list was still updated and remains usable for the
    /// rest of the session; `saved` holds the record a failed save created.
    #[error("saved prompts storage failed: {error:#}")]
    Persistence {
        error: anyhow::Error,
        saved: Option<Box<SavedPrompt>>,
    },

    /// Copying to the system clipboard failed.
    #[error("failed to copy to clipboard: {0:#}")]
    Clipboard(anyhow::Error),
}

impl PromptError {
    pub fn validation(message: impl Into<String>) -> Self {
        PromptError::Validation(message.into())
    }

    pub fn persistence(error: impl Into<anyhow::Error>) -> Self {
        PromptError::Persistence { error: error.into(), saved: None }
    }

    /// The record a failed save kept in memory, if this error came from one.
    pub fn unsaved_prompt(&self) -> Option<&SavedPrompt> {
        match self {
            PromptError::Persistence { saved, .. } => saved.as_deref(),
            _ => None,
        }
    }
}

/// Errors raised while building a template catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one category")]
    Empty,

    #[error("category names must not be empty")]
    EmptyName,

    #[error("duplicate category name '{0}' (names are compared case-insensitively)")]
    DuplicateCategory(String),

    #[error("category '{0}' has no templates")]
    NoTemplates(String),

    #[error("template must contain exactly one {{topic}} placeholder, found {found}: {template:?}")]
    Placeholder { template: String, found: usize },

    #[error("malformed catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}
