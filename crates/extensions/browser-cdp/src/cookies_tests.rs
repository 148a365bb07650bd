use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use super::*;

/// Browser session with an in-memory cookie jar.
struct FakeSession {
    url: String,
    jar: Mutex<Vec<Cookie>>,
    installed: Mutex<Vec<Cookie>>,
}

impl FakeSession {
    fn new(url: &str, jar: Vec<Cookie>) -> Self {
        Self {
            url: url.to_string(),
            jar: Mutex::new(jar),
            installed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, _url: &str) -> Result<(), DomError> {
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DomError> {
        Ok(self.url.clone())
    }

    async fn get_cookies(&self) -> Result<Vec<Cookie>, DomError> {
        Ok(self.jar.lock().unwrap().clone())
    }

    async fn set_cookies(&self, cookies: &[Cookie]) -> Result<(), DomError> {
        self.installed.lock().unwrap().extend_from_slice(cookies);
        Ok(())
    }

    async fn close(&self) -> Result<(), DomError> {
        Ok(())
    }
}

const GAME_URL: &str = "https://www.pokernow.club/games/pglXyz";

fn store_in(dir: &TempDir) -> CookieStore {
    CookieStore::new(dir.path().join("state").join("cookies.json"))
}

#[tokio::test]
async fn test_capture_when_no_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let session = FakeSession::new(GAME_URL, vec![Cookie::new("npt", "token", ".pokernow.club")]);

    let sync = store.restore_or_capture(&session).await.unwrap();

    assert_eq!(sync, CookieSync::Captured(1));
    assert!(store.exists());
    assert_eq!(store.load().unwrap()[0].value, "token");
    assert!(session.installed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_restore_filters_by_domain() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .write(&[
            Cookie::new("npt", "token", ".pokernow.club"),
            Cookie::new("apt", "other", "www.pokernow.club"),
            Cookie::new("ga", "tracker", "analytics.example.com"),
        ])
        .unwrap();

    let session = FakeSession::new(GAME_URL, Vec::new());
    let sync = store.restore_or_capture(&session).await.unwrap();

    assert_eq!(sync, CookieSync::Restored(2));
    let names: Vec<String> = session
        .installed
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["npt", "apt"]);
}

#[tokio::test]
async fn test_save_overwrites_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.write(&[Cookie::new("old", "1", ".pokernow.club")]).unwrap();

    let session = FakeSession::new(
        GAME_URL,
        vec![
            Cookie::new("npt", "fresh", ".pokernow.club"),
            Cookie::new("apt", "fresh", ".pokernow.club"),
        ],
    );
    assert_eq!(store.save(&session).await.unwrap(), 2);

    let stored = store.load().unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|c| c.value == "fresh"));
}

#[test]
fn test_corrupt_store_is_format_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "not json").unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, CookieStoreError::Format { .. }));
    assert!(err.to_string().contains("cookies.json"));
}

#[test]
fn test_missing_store_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = store_in(&dir).load().unwrap_err();
    assert!(matches!(err, CookieStoreError::Io { .. }));
}
