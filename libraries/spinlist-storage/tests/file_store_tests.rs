//! File-backed session store tests
//!
//! Every test runs against a fresh temporary directory.

use spinlist_core::PlaybackSession;
use spinlist_storage::{
    JsonFileStore, KeyValueStore, SessionStore, StorageError, CURRENT_AUDIO_INDEX,
    CURRENT_PLAYBACK_POSITION,
};
use tempfile::TempDir;

#[test]
fn missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("session.json")).unwrap();

    assert_eq!(store.get(CURRENT_AUDIO_INDEX).unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn writes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("session.json");

    {
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set(CURRENT_AUDIO_INDEX, "4").unwrap();
        store.set(CURRENT_PLAYBACK_POSITION, "17.25").unwrap();
    }

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.get(CURRENT_AUDIO_INDEX).unwrap().as_deref(), Some("4"));
    assert_eq!(
        reopened.get(CURRENT_PLAYBACK_POSITION).unwrap().as_deref(),
        Some("17.25")
    );
}

#[test]
fn file_is_a_flat_json_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.set(CURRENT_AUDIO_INDEX, "0").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[CURRENT_AUDIO_INDEX], "0");
}

#[test]
fn remove_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.set(CURRENT_PLAYBACK_POSITION, "9").unwrap();
    store.remove(CURRENT_PLAYBACK_POSITION).unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.get(CURRENT_PLAYBACK_POSITION).unwrap(), None);
}

#[test]
fn empty_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "").unwrap();

    let store = JsonFileStore::open(&path).unwrap();
    assert_eq!(store.get(CURRENT_AUDIO_INDEX).unwrap(), None);
}

#[test]
fn corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = JsonFileStore::open(&path).unwrap_err();
    assert!(matches!(err, StorageError::SerializationError(_)));
}

#[test]
fn session_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut sessions = SessionStore::new(JsonFileStore::open(&path).unwrap());
    sessions.save(&PlaybackSession::at(2, 42.5)).unwrap();

    let restored = SessionStore::new(JsonFileStore::open(&path).unwrap())
        .load()
        .unwrap();
    assert_eq!(restored, PlaybackSession::at(2, 42.5));
}

#[test]
fn failed_write_is_retried_with_same_value() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "").unwrap();
    let path = blocker.join("session.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    assert!(store.set(CURRENT_AUDIO_INDEX, "2").is_err());
    assert_eq!(store.get(CURRENT_AUDIO_INDEX).unwrap(), None);

    std::fs::remove_file(&blocker).unwrap();
    store.set(CURRENT_AUDIO_INDEX, "2").unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.get(CURRENT_AUDIO_INDEX).unwrap().as_deref(), Some("2"));
}

#[test]
fn failed_remove_keeps_entry() {
    let dir = TempDir::new().unwrap();
    let parent = dir.path().join("state");
    let path = parent.join("session.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.set(CURRENT_PLAYBACK_POSITION, "9").unwrap();

    std::fs::remove_dir_all(&parent).unwrap();
    std::fs::write(&parent, "").unwrap();
    assert!(store.remove(CURRENT_PLAYBACK_POSITION).is_err());
    assert_eq!(
        store.get(CURRENT_PLAYBACK_POSITION).unwrap().as_deref(),
        Some("9")
    );

    std::fs::remove_file(&parent).unwrap();
    store.remove(CURRENT_PLAYBACK_POSITION).unwrap();
    assert!(JsonFileStore::open(&path)
        .unwrap()
        .get(CURRENT_PLAYBACK_POSITION)
        .unwrap()
        .is_none());
}
