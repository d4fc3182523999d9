use crate::storage::PromptStorage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

/// Keeps the slot as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    data_dir: PathBuf,
    slot: String,
}

impl FileSystemStorage {
    /// Creates a new FileSystemStorage instance.
    /// Tries to create the data directory up front.
    pub fn new<P: AsRef<Path>>(data_dir: P, slot: impl Into<String>) -> Self {
        let path_buf = data_dir.as_ref().to_path_buf();
        // Ensure directory exists (synchronous for simplicity in constructor)
        if let Err(e) = std::fs::create_dir_all(&path_buf) {
            // Log error but proceed; writes will report the failure
            error!(path = %path_buf.display(), error = %e, "Failed to create data directory during initialization");
        }
        Self {
            data_dir: path_buf,
            slot: slot.into(),
        }
    }

    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.slot))
    }

    fn temp_path(&self) -> PathBuf {
        self.data_dir.join(format!(".{}.json.tmp", self.slot))
    }
}

#[async_trait]
impl PromptStorage for FileSystemStorage {
    async fn read(&self) -> Result<Option<String>> {
        let path = self.slot_path();
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read slot file: {}", path.display())),
        }
    }

    async fn write(&self, contents: &str) -> Result<()> {
        let path = self.slot_path();
        let temp = self.temp_path();

        // Ensure directory exists before writing
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)
                .await
                .with_context(|| format!("Failed to create data directory '{}'", self.data_dir.display()))?;
        }

        let mut file = fs::File::create(&temp)
            .await
            .with_context(|| format!("Failed to create temporary slot file: {}", temp.display()))?;
        file.write_all(contents.as_bytes())
            .await
            .with_context(|| format!("Failed to write temporary slot file: {}", temp.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("Failed to flush temporary slot file: {}", temp.display()))?;
        drop(file);

        // Rename over the old slot so readers never see a partial write
        fs::rename(&temp, &path)
            .await
            .with_context(|| format!("Failed to replace slot file: {}", path.display()))?;
        debug!(path = %path.display(), bytes = contents.len(), "Slot written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.slot_path().display().to_string()
    }
}
