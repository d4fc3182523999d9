use promptsmith::storage::{FileSystemStorage, PromptStorage};
use promptsmith::{Catalog, DelayWindow, Generator, PromptId, PromptStore, Session, SystemClock};
use std::sync::Arc;
use tempfile::tempdir;

async fn open(dir: &std::path::Path) -> PromptStore {
    let storage: Arc<dyn PromptStorage> = Arc::new(FileSystemStorage::new(dir, "savedPrompts"));
    PromptStore::load(storage, Arc::new(SystemClock)).await
}

#[tokio::test]
async fn saved_prompts_survive_restart() {
    let dir = tempdir().unwrap();

    let mut store = open(dir.path()).await;
    let a = store.save("cats", "text").await.unwrap();
    let b = store.save("dogs", "more text").await.unwrap();
    drop(store);

    let store = open(dir.path()).await;
    assert_eq!(store.list(), [b, a]);
}

#[tokio::test]
async fn deletes_survive_restart() {
    let dir = tempdir().unwrap();

    let mut store = open(dir.path()).await;
    let a = store.save("cats", "text").await.unwrap();
    let b = store.save("dogs", "more text").await.unwrap();
    store.delete(&b.id).await.unwrap();
    store.delete(&b.id).await.unwrap();
    drop(store);

    let mut store = open(dir.path()).await;
    assert_eq!(store.list(), [a.clone()]);
    store.delete(&a.id).await.unwrap();
    assert!(open(dir.path()).await.is_empty());
}

#[tokio::test]
async fn reads_data_written_by_the_browser_version() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("savedPrompts.json"),
        r#"[{"id":1718000000000,"topic":"cats","prompt":"Write about \"cats\"","timestamp":"6/10/2024, 7:33:20 AM"}]"#,
    )
    .unwrap();

    let mut store = open(dir.path()).await;
    assert_eq!(store.list()[0].id, PromptId::Number(1_718_000_000_000));

    let fresh = store.save("dogs", "text").await.unwrap();
    assert_ne!(fresh.id, store.list()[1].id);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn corrupt_file_is_treated_as_no_data() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("savedPrompts.json"), "{ definitely not a list").unwrap();

    let mut store = open(dir.path()).await;
    assert!(store.is_empty());

    // The next write replaces the corrupt contents.
    store.save("cats", "text").await.unwrap();
    assert_eq!(open(dir.path()).await.len(), 1);
}

#[tokio::test]
async fn generate_and_save_end_to_end() {
    let dir = tempdir().unwrap();
    let generator = Generator::with_seed(Arc::new(Catalog::builtin()), DelayWindow::NONE, Some(42));
    let mut session = Session::new(generator, open(dir.path()).await, None);

    let generation = session.generate("business strategy help").await.unwrap().clone();
    assert_eq!(generation.category, "business strategy");
    assert!(generation.prompt.contains("business strategy help"));
    session.save_current().await.unwrap();

    let store = open(dir.path()).await;
    assert_eq!(store.list()[0].topic, "business strategy help");
    assert_eq!(store.list()[0].prompt, generation.prompt);
}

#[tokio::test]
async fn unreadable_slot_is_reported_not_hidden() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("savedPrompts.json")).unwrap();

    let store = open(dir.path()).await;
    assert!(store.is_empty());
    let error = store.load_error().expect("read failure should be reported");
    assert!(matches!(error, promptsmith::PromptError::Persistence { .. }));
    assert!(error.to_string().contains("Failed to read slot file"));
}
