pub mod catalog;
pub mod clipboard;
pub mod error;
pub mod generator;
pub mod models;
pub mod render;
pub mod repl;
pub mod session;
pub mod storage;
pub mod store;

pub use catalog::Catalog;
pub use error::{CatalogError, PromptError};
pub use generator::{DelayWindow, Generation, Generator};
pub use models::{Category, PromptId, SavedPrompt, Template};
pub use session::Session;
pub use storage::{FileSystemStorage, MemoryStorage, PromptStorage};
pub use store::{Clock, PromptStore, SystemClock};
