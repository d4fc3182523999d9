//! The saved-prompts list and its persistence.
//!
//! The store is the only reader and writer of its slot. Every mutation
//! rewrites the whole list, newest entry first. A slot that is missing or
//! cannot be parsed loads as an empty list so the tool stays usable after a
//! format change.

use crate::error::PromptError;
use crate::models::prompt::{PromptId, SavedPrompt};
use crate::storage::PromptStorage;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Source of creation times, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Format used for `SavedPrompt::timestamp`, e.g. `6/10/2024, 7:33:20 AM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub struct PromptStore {
    storage: Arc<dyn PromptStorage>,
    clock: Arc<dyn Clock>,
    prompts: Vec<SavedPrompt>,
    last_id: u64,
    load_error: Option<PromptError>,
}

impl PromptStore {
    /// Reads the slot and builds the store. Never fails; a slot that exists but
    /// cannot be read is reported through `load_error`.
    pub async fn load(storage: Arc<dyn PromptStorage>, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self {
            storage,
            clock,
            prompts: Vec::new(),
            last_id: 0,
            load_error: None,
        };
        store.reload().await;
        store
    }

    /// Discards the in-memory list and reads the slot again, as on a restart.
    #[instrument(skip(self), fields(slot = %self.storage.describe()))]
    pub async fn reload(&mut self) -> &[SavedPrompt] {
        self.load_error = None;
        let prompts = match self.storage.read().await {
            Ok(Some(contents)) => parse_slot(&contents),
            Ok(None) => {
                debug!("Slot is empty, starting with no saved prompts");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Failed to read saved prompts, starting empty");
                self.load_error = Some(PromptError::persistence(e));
                Vec::new()
            }
        };
        self.last_id = prompts
            .iter()
            .filter_map(|p| p.id.as_number())
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        self.prompts = prompts;
        info!(count = self.prompts.len(), "Loaded saved prompts");
        &self.prompts
    }

    /// Why the last load came up empty, when the slot could not be read.
    /// Saving or deleting afterwards overwrites the unread slot.
    pub fn load_error(&self) -> Option<&PromptError> {
        self.load_error.as_ref()
    }

    /// Newest first.
    pub fn list(&self) -> &[SavedPrompt] {
        &self.prompts
    }

    pub fn get(&self, id: &PromptId) -> Option<&SavedPrompt> {
        self.prompts.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Records a new saved prompt at the front of the list and persists it.
    ///
    /// On `PromptError::Persistence` the entry is still in memory, shows up in
    /// `list()` for the rest of the session and is carried in the error.
    #[instrument(skip(self, prompt))]
    pub async fn save(&mut self, topic: &str, prompt: &str) -> Result<SavedPrompt, PromptError> {
        if topic.trim().is_empty() {
            return Err(PromptError::validation("Cannot save a prompt without a topic"));
        }
        if prompt.trim().is_empty() {
            return Err(PromptError::validation("There is no generated prompt to save"));
        }

        let now = self.clock.now();
        let saved = SavedPrompt {
            id: PromptId::Number(self.next_id(&now)),
            topic: topic.to_string(),
            prompt: prompt.to_string(),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        };
        self.prompts.insert(0, saved.clone());
        info!(id = %saved.id, "Saved prompt");

        match self.persist().await {
            Ok(()) => Ok(saved),
            Err(PromptError::Persistence { error, .. }) => Err(PromptError::Persistence {
                error,
                saved: Some(Box::new(saved)),
            }),
            Err(e) => Err(e),
        }
    }

    /// Removes the entry with `id`. Unknown ids are not an error.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &PromptId) -> Result<&[SavedPrompt], PromptError> {
        let before = self.prompts.len();
        self.prompts.retain(|p| &p.id != id);
        if self.prompts.len() < before {
            info!("Deleted saved prompt");
        } else {
            debug!("No saved prompt with that id");
        }

        self.persist().await?;
        Ok(&self.prompts)
    }

    /// Millisecond creation time, bumped past every id seen so far.
    fn next_id(&mut self, now: &DateTime<Local>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        id
    }

    async fn persist(&self) -> Result<(), PromptError> {
        let contents = serde_json::to_string_pretty(&self.prompts)
            .map_err(PromptError::persistence)?;
        self.storage.write(&contents).await.map_err(|e| {
            warn!(error = %format!("{:#}", e), "Saved prompts kept in memory only");
            PromptError::persistence(e)
        })
    }
}

/// Parses slot contents, tolerating `null`, garbage and duplicate ids.
fn parse_slot(contents: &str) -> Vec<SavedPrompt> {
    let parsed: Option<Vec<SavedPrompt>> = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Saved prompts are unreadable, starting empty");
            return Vec::new();
        }
    };
    let mut seen = HashSet::new();
    let mut prompts = parsed.unwrap_or_default();
    prompts.retain(|p| {
        let fresh = seen.insert(p.id.clone());
        if !fresh {
            warn!(id = %p.id, "Dropping saved prompt with duplicate id");
        }
        fresh
    });
    prompts
}
