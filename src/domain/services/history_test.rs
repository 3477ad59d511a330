use anyhow::Result;
use test_utils::scratch_dir;

use super::HistoryStore;
use super::Storage;
use super::StorageKey;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[tokio::test]
async fn it_loads_empty_history_on_first_run() -> Result<()> {
    let store = HistoryStore::new(Storage::new(scratch_dir()));

    let messages = store.load().await?;

    assert!(messages.is_empty());
    return Ok(());
}

#[tokio::test]
async fn it_round_trips_messages_in_insertion_order() -> Result<()> {
    let store = HistoryStore::new(Storage::new(scratch_dir()));
    let messages = vec![
        Message::new(Author::User, "What are our most popular dishes?"),
        Message::new(Author::Assistant, "Your top seller is the margherita."),
        Message::new(Author::User, "And by revenue?"),
    ];

    store.save(&messages).await?;
    let loaded = store.load().await?;

    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].author, Author::User);
    assert_eq!(loaded[0].text, "What are our most popular dishes?");
    assert_eq!(loaded[1].author, Author::Assistant);
    assert_eq!(loaded[2].text, "And by revenue?");
    return Ok(());
}

#[tokio::test]
async fn it_yields_empty_history_for_corrupt_record() -> Result<()> {
    let storage = Storage::new(scratch_dir());
    tokio::fs::create_dir_all(&storage.data_dir).await?;
    tokio::fs::write(storage.data_dir.join("chat-history.json"), "][ nope").await?;

    let store = HistoryStore::new(storage);
    let messages = store.load().await?;

    assert!(messages.is_empty());
    return Ok(());
}

#[tokio::test]
async fn it_clears_history() -> Result<()> {
    let store = HistoryStore::new(Storage::new(scratch_dir()));
    store
        .save(&[Message::new(Author::User, "Hello")])
        .await?;

    store.clear().await?;
    let messages = store.load().await?;

    assert!(messages.is_empty());
    return Ok(());
}

#[tokio::test]
async fn it_keeps_history_out_of_other_records() -> Result<()> {
    let storage = Storage::new(scratch_dir());
    storage.write(StorageKey::AuthToken, &"abc123".to_string()).await?;

    let store = HistoryStore::new(storage);
    let messages = store.load().await?;

    assert!(messages.is_empty());
    return Ok(());
}
