use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use studymate::store::{get_token, get_username, save_credential};
use studymate::wire::Credential;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn scratch_store() -> FileStore {
    let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("studymate-store-{}-{n}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    FileStore::new(dir.join("nested").join(STORE_FILE))
}

// =============================================================
// default_store_path
// =============================================================

#[test]
fn studymate_home_wins_over_home() {
    let path = default_store_path(Some("/opt/sm"), Some("/home/alice")).unwrap();
    assert_eq!(path, PathBuf::from("/opt/sm/credentials.json"));
}

#[test]
fn falls_back_to_dot_dir_under_home() {
    let path = default_store_path(None, Some("/home/alice")).unwrap();
    assert_eq!(path, PathBuf::from("/home/alice/.studymate/credentials.json"));
}

#[test]
fn blank_dirs_are_ignored() {
    assert_eq!(
        default_store_path(Some("  "), Some("/home/bob")).unwrap(),
        PathBuf::from("/home/bob/.studymate/credentials.json")
    );
    assert!(default_store_path(None, Some("")).is_none());
    assert!(default_store_path(None, None).is_none());
}

// =============================================================
// FileStore
// =============================================================

#[test]
fn missing_file_reads_as_empty() {
    let store = scratch_store();
    assert_eq!(store.get("auth_token"), None);
    assert!(store.clear().is_ok());
}

#[test]
fn saved_credential_survives_a_new_handle() {
    let store = scratch_store();
    let credential = Credential { auth_token: "tok-1".into(), username: "alice".into() };
    save_credential(&store, &credential).unwrap();

    let reopened = FileStore::new(store.path());
    assert_eq!(get_token(&reopened).as_deref(), Some("tok-1"));
    assert_eq!(get_username(&reopened).as_deref(), Some("alice"));
}

#[test]
fn clear_removes_every_key() {
    let store = scratch_store();
    store.set("auth_token", "tok").unwrap();
    store.set("theme", "dark").unwrap();

    store.clear().unwrap();

    assert_eq!(store.get("auth_token"), None);
    assert_eq!(store.get("theme"), None);
    assert!(!store.path().exists());
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
    let store = scratch_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "not json").unwrap();

    assert_eq!(store.get("auth_token"), None);
    store.set("auth_token", "fresh").unwrap();
    assert_eq!(store.get("auth_token").as_deref(), Some("fresh"));
}
