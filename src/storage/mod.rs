use anyhow::Result;
use async_trait::async_trait;

pub mod filesystem;
pub mod memory;

pub use filesystem::FileSystemStorage;
pub use memory::MemoryStorage;

/// Name of the slot holding the saved-prompts list.
pub const DEFAULT_SLOT: &str = "savedPrompts";

/// A single named, durable slot holding the serialized saved-prompts list.
///
/// The whole list is read and written at once; backends never see individual
/// records.
#[async_trait]
pub trait PromptStorage: Send + Sync + 'static { // Send + Sync so it can sit behind Arc<dyn _>
    /// Returns the slot contents, or `None` if nothing was ever written.
    async fn read(&self) -> Result<Option<String>>;

    /// Replaces the slot contents.
    async fn write(&self, contents: &str) -> Result<()>;

    /// Where the slot lives, for log lines.
    fn describe(&self) -> String;
}
