use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Somewhere to export the current prompt to. Best effort only.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy(&self, text: &str) -> Result<()>;
}

/// Pipes text into the platform's clipboard command.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Picks a clipboard command for the current platform, if one is likely
    /// to exist.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            Some(Self::new("pbcopy", &[]))
        } else if cfg!(target_os = "windows") {
            Some(Self::new("clip", &[]))
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Some(Self::new("wl-copy", &[]))
        } else if std::env::var_os("DISPLAY").is_some() {
            Some(Self::new("xclip", &["-selection", "clipboard"]))
        } else {
            None
        }
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn copy(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start clipboard command '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .with_context(|| format!("Failed to send text to '{}'", self.program))?;
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for '{}'", self.program))?;
        if !status.success() {
            bail!("'{}' exited with {}", self.program, status);
        }
        debug!(program = %self.program, bytes = text.len(), "Copied to clipboard");
        Ok(())
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn copy(&self, text: &str) -> Result<()> {
        match self.contents.lock() {
            Ok(mut contents) => {
                *contents = Some(text.to_string());
                Ok(())
            }
            Err(_) => bail!("clipboard lock poisoned"),
        }
    }
}
