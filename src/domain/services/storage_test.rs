use anyhow::Result;
use test_utils::scratch_dir;

use super::Storage;
use super::StorageKey;

#[test]
fn it_names_record_files_by_key() {
    let storage = Storage::new(scratch_dir());
    assert!(storage
        .record_path(StorageKey::ChatHistory)
        .ends_with("chat-history.json"));
    assert!(storage
        .record_path(StorageKey::Dashboards)
        .ends_with("dashboards.json"));
    assert!(storage
        .record_path(StorageKey::AuthToken)
        .ends_with("auth-token.json"));
}

#[tokio::test]
async fn it_reads_back_what_it_wrote() -> Result<()> {
    let storage = Storage::new(scratch_dir());

    storage
        .write(StorageKey::ChatHistory, &vec!["one".to_string(), "two".to_string()])
        .await?;
    let res: Option<Vec<String>> = storage.read(StorageKey::ChatHistory).await?;

    assert_eq!(res, Some(vec!["one".to_string(), "two".to_string()]));
    return Ok(());
}

#[tokio::test]
async fn it_reads_none_when_record_missing() -> Result<()> {
    let storage = Storage::new(scratch_dir());

    let res: Option<Vec<String>> = storage.read(StorageKey::ChatHistory).await?;

    assert!(res.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_discards_corrupt_records() -> Result<()> {
    let storage = Storage::new(scratch_dir());
    tokio::fs::create_dir_all(&storage.data_dir).await?;
    tokio::fs::write(
        storage.record_path(StorageKey::ChatHistory),
        "{not valid json",
    )
    .await?;

    let res: Option<Vec<String>> = storage.read(StorageKey::ChatHistory).await?;

    assert!(res.is_none());
    assert!(!storage.record_path(StorageKey::ChatHistory).exists());
    return Ok(());
}

#[tokio::test]
async fn it_removes_records() -> Result<()> {
    let storage = Storage::new(scratch_dir());

    storage.write(StorageKey::AuthToken, &"abc123".to_string()).await?;
    storage.remove(StorageKey::AuthToken).await?;

    let res: Option<String> = storage.read(StorageKey::AuthToken).await?;
    assert!(res.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_removes_missing_records_without_error() -> Result<()> {
    let storage = Storage::new(scratch_dir());

    storage.remove(StorageKey::AuthToken).await?;
    return Ok(());
}
