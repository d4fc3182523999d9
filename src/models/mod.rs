pub mod category;
pub mod prompt;

pub use category::{Category, Template, TOPIC_PLACEHOLDER};
pub use prompt::{PromptId, SavedPrompt};
