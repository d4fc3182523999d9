use crate::storage::PromptStorage;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-process slot. Contents vanish with the process.
///
/// Reads and writes can be made to fail on demand, which is how the
/// persistence error paths are exercised.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `contents` already in the slot.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PromptStorage for MemoryStorage {
    async fn read(&self) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("storage unavailable");
        }
        match self.contents.lock() {
            Ok(contents) => Ok(contents.clone()),
            Err(_) => bail!("memory slot lock poisoned"),
        }
    }

    async fn write(&self, contents: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("storage quota exceeded");
        }
        match self.contents.lock() {
            Ok(mut slot) => {
                *slot = Some(contents.to_string());
                Ok(())
            }
            Err(_) => bail!("memory slot lock poisoned"),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
