//! Session kept in a JSON file between invocations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use api_client::{Session, SessionError, SessionStore};
use core_types::User;
use tracing::warn;

/// Default file name under `$HOME`.
pub const DEFAULT_SESSION_FILE: &str = ".feedback-session.json";

/// `$HOME/.feedback-session.json`, if a home directory is known.
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_SESSION_FILE))
}

/// Token and user stored together as one JSON document.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // serializes read-modify-write of the file
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Session {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Session::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Session::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read session file");
                Session::default()
            }
        }
    }

    fn update(&self, apply: impl FnOnce(&mut Session)) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut session = self.read();
        apply(&mut session);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&session)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Session {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.read()
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        self.update(|s| s.token = Some(token.to_string()))
    }

    fn save_user(&self, user: &User) -> Result<(), SessionError> {
        self.update(|s| s.user = Some(user.clone()))
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::Role;
    use tempfile::tempdir;

    fn sample_user() -> User {
        User {
            id: 3,
            username: "alice_employee".to_string(),
            email: Some("alice_employee@example.com".to_string()),
            role: Role::Employee,
            manager_id: Some(1),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.load(), Session::default());
    }

    #[test]
    fn test_save_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::new(&path);
        store.save_token("tok-123").unwrap();
        store.save_user(&sample_user()).unwrap();

        let reopened = FileSessionStore::new(&path).load();
        assert_eq!(reopened.token.as_deref(), Some("tok-123"));
        assert_eq!(reopened.user.map(|u| u.username), Some("alice_employee".to_string()));
    }

    #[test]
    fn test_clear_removes_both() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save_token("tok").unwrap();
        store.save_user(&sample_user()).unwrap();

        store.clear().unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load(), Session::default());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.load(), Session::default());

        store.save_token("fresh").unwrap();
        assert_eq!(store.load().token.as_deref(), Some("fresh"));
    }
}
