//! Session
//!
//! Bearer token persistence and the client-side route guard.
//! The guard only decides what to render; it is not a security boundary.

use std::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Where the token lives
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> AppResult<()>;
    fn clear(&self);
}

/// Token in `window.localStorage`
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// False when storage is disabled (private mode, sandboxed iframe)
    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }

    fn storage() -> AppResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| AppError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|_| AppError::Storage("local storage is blocked".to_string()))?
            .ok_or_else(|| AppError::Storage("local storage unavailable".to_string()))
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()
            .ok()?
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|t| !t.trim().is_empty())
    }

    fn save(&self, token: &str) -> AppResult<()> {
        Self::storage()?
            .set_item(&self.key, token)
            .map_err(|_| AppError::Storage("could not write token".to_string()))
    }

    fn clear(&self) {
        if let Ok(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// Token held in memory only
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) -> AppResult<()> {
        let mut guard = self.token.lock().map_err(|_| AppError::Storage("poisoned".to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }
}

/// Top-level screens
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Login,
    Boards,
    Board(String),
}

impl Route {
    /// Parse a location hash (`#/boards/<id>`). Unknown hashes map to the
    /// board list.
    pub fn from_hash(hash: &str) -> Route {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let mut parts = path.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some("login"), None) => Route::Login,
            (Some("boards"), Some(id)) if !id.is_empty() && !id.contains('/') => {
                let id = percent_encoding::percent_decode_str(id).decode_utf8_lossy();
                Route::Board(id.into_owned())
            }
            _ => Route::Boards,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Login => "#/login".to_string(),
            Route::Boards => "#/boards".to_string(),
            Route::Board(id) => format!(
                "#/boards/{}",
                percent_encoding::utf8_percent_encode(id, percent_encoding::NON_ALPHANUMERIC)
            ),
        }
    }
}

/// Redirect to login when there is no token; leave login once there is one
pub fn guard(requested: Route, signed_in: bool) -> Route {
    match (requested, signed_in) {
        (_, false) => Route::Login,
        (Route::Login, true) => Route::Boards,
        (route, true) => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_without_token() {
        assert_eq!(guard(Route::Board("b1".into()), false), Route::Login);
        assert_eq!(guard(Route::Boards, false), Route::Login);
    }

    #[test]
    fn test_guard_passes_with_token() {
        assert_eq!(guard(Route::Board("b1".into()), true), Route::Board("b1".into()));
        assert_eq!(guard(Route::Login, true), Route::Boards);
    }

    #[test]
    fn test_route_hash() {
        assert_eq!(Route::from_hash("#/boards/b%201"), Route::Board("b 1".into()));
        assert_eq!(Route::from_hash("#/boards/"), Route::Boards);
        assert_eq!(Route::from_hash(""), Route::Boards);
        assert_eq!(Route::from_hash("#/login"), Route::Login);
        assert_eq!(Route::from_hash(&Route::Board("a/b".into()).to_hash()), Route::Board("a/b".into()));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);
        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
