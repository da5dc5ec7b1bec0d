//! Browser `localStorage` session store.

use api_client::{Session, SessionError, SessionStore, TOKEN_KEY, USER_KEY};
use core_types::User;
use web_sys::Storage;

/// Keeps the token and user under the `authToken` and `user` keys.
///
/// Holds no handle itself; storage is looked up on every call so the store
/// stays `Send + Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

fn storage() -> Result<Storage, SessionError> {
    web_sys::window()
        .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?
        .local_storage()
        .ok()
        .flatten()
        .ok_or_else(|| SessionError::Unavailable("localStorage disabled".to_string()))
}

fn set(key: &str, value: &str) -> Result<(), SessionError> {
    storage()?
        .set_item(key, value)
        .map_err(|e| SessionError::Unavailable(format!("{e:?}")))
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Session {
        let Ok(storage) = storage() else {
            return Session::default();
        };
        let get = |key: &str| storage.get_item(key).ok().flatten();

        Session {
            token: get(TOKEN_KEY),
            user: get(USER_KEY).and_then(|raw| serde_json::from_str(&raw).ok()),
        }
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        set(TOKEN_KEY, token)
    }

    fn save_user(&self, user: &User) -> Result<(), SessionError> {
        set(USER_KEY, &serde_json::to_string(user)?)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let storage = storage()?;
        for key in [USER_KEY, TOKEN_KEY] {
            storage
                .remove_item(key)
                .map_err(|e| SessionError::Unavailable(format!("{e:?}")))?;
        }
        Ok(())
    }
}
