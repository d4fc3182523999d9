//! State a front end keeps between user actions: the current topic and prompt,
//! the saved-prompts store and the clipboard.

use crate::clipboard::Clipboard;
use crate::error::PromptError;
use crate::generator::{Generation, Generator};
use crate::models::prompt::{PromptId, SavedPrompt};
use crate::store::PromptStore;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Session<R = StdRng> {
    generator: Generator<R>,
    store: PromptStore,
    clipboard: Option<Arc<dyn Clipboard>>,
    current: Option<Generation>,
}

impl<R: Rng> Session<R> {
    pub fn new(generator: Generator<R>, store: PromptStore, clipboard: Option<Arc<dyn Clipboard>>) -> Self {
        Self {
            generator,
            store,
            clipboard,
            current: None,
        }
    }

    pub fn generator(&self) -> &Generator<R> {
        &self.generator
    }

    /// The last successful generation, if any.
    pub fn current(&self) -> Option<&Generation> {
        self.current.as_ref()
    }

    pub fn saved(&self) -> &[SavedPrompt] {
        self.store.list()
    }

    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    /// Generates a prompt for `topic` and makes it current. A failed attempt
    /// leaves the previous one in place.
    pub async fn generate(&mut self, topic: &str) -> Result<&Generation, PromptError> {
        let generation = self.generator.generate(topic).await?;
        info!(topic = %generation.topic, category = %generation.category, "Prompt generated");
        Ok(self.current.insert(generation))
    }

    /// Generates again for the current topic.
    pub async fn regenerate(&mut self) -> Result<&Generation, PromptError> {
        let topic = match &self.current {
            Some(current) => current.topic.clone(),
            None => return Err(PromptError::validation("Generate a prompt first")),
        };
        self.generate(&topic).await
    }

    /// Saves the current topic and prompt.
    pub async fn save_current(&mut self) -> Result<SavedPrompt, PromptError> {
        let Some(current) = &self.current else {
            return Err(PromptError::validation("There is no generated prompt to save"));
        };
        let (topic, prompt) = (current.topic.clone(), current.prompt.clone());
        self.store.save(&topic, &prompt).await
    }

    /// Sends the current prompt to the clipboard.
    pub async fn copy_current(&self) -> Result<(), PromptError> {
        let Some(current) = &self.current else {
            return Err(PromptError::validation("There is no generated prompt to copy"));
        };
        let Some(clipboard) = &self.clipboard else {
            return Err(PromptError::Clipboard(anyhow::anyhow!("no clipboard available")));
        };
        clipboard.copy(&current.prompt).await.map_err(|e| {
            warn!(error = %format!("{:#}", e), "Clipboard copy failed");
            PromptError::Clipboard(e)
        })
    }

    pub async fn delete(&mut self, id: &PromptId) -> Result<&[SavedPrompt], PromptError> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::clipboard::MemoryClipboard;
    use crate::generator::DelayWindow;
    use crate::storage::MemoryStorage;
    use crate::store::SystemClock;

    async fn session(clipboard: Option<Arc<dyn Clipboard>>) -> (Session, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = PromptStore::load(storage.clone(), Arc::new(SystemClock)).await;
        let generator = Generator::with_seed(Arc::new(Catalog::builtin()), DelayWindow::NONE, Some(11));
        (Session::new(generator, store, clipboard), storage)
    }

    #[tokio::test]
    async fn actions_need_a_current_prompt() {
        let (mut session, _) = session(None).await;
        assert!(matches!(session.regenerate().await, Err(PromptError::Validation(_))));
        assert!(matches!(session.save_current().await, Err(PromptError::Validation(_))));
        assert!(matches!(session.copy_current().await, Err(PromptError::Validation(_))));
    }

    #[tokio::test]
    async fn blank_topic_keeps_previous_prompt() {
        let (mut session, _) = session(None).await;
        session.generate("cats").await.unwrap();
        assert!(session.generate("   ").await.is_err());
        assert_eq!(session.current().map(|c| c.topic.as_str()), Some("cats"));
    }

    #[tokio::test]
    async fn regenerate_keeps_topic() {
        let (mut session, _) = session(None).await;
        session.generate("social media").await.unwrap();
        let again = session.regenerate().await.unwrap();
        assert_eq!(again.topic, "social media");
        assert_eq!(again.category, "social media");
    }

    #[tokio::test]
    async fn save_current_persists_generated_prompt() {
        let (mut session, storage) = session(None).await;
        let prompt = session.generate("cats").await.unwrap().prompt.clone();
        let saved = session.save_current().await.unwrap();
        assert_eq!(saved.topic, "cats");
        assert_eq!(saved.prompt, prompt);
        assert_eq!(session.saved().len(), 1);
        assert!(storage.contents().unwrap().contains("\"cats\""));

        session.delete(&saved.id).await.unwrap();
        assert!(session.saved().is_empty());
    }

    #[tokio::test]
    async fn copy_goes_to_clipboard() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (mut session, _) = session(Some(clipboard.clone() as Arc<dyn Clipboard>)).await;
        let prompt = session.generate("coding help").await.unwrap().prompt.clone();
        session.copy_current().await.unwrap();
        assert_eq!(clipboard.contents(), Some(prompt));
    }

    #[tokio::test]
    async fn copy_without_clipboard_is_reported() {
        let (mut session, _) = session(None).await;
        session.generate("cats").await.unwrap();
        assert!(matches!(session.copy_current().await, Err(PromptError::Clipboard(_))));
    }
}
