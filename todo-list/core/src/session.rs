//! Session context and the host-provided collaborators around it.
//!
//! The session is an explicit value: it is created when the user logs in,
//! handed to the task list controller, and ended on logout. The persisted
//! form lives in a key-value store (LocalStorage in the browser):
//! - a "logged in user" JSON blob containing at least an `email`
//! - an authentication token, which is the only thing removed on logout
//!
//! Navigation and the destructive-action confirmation prompt are traits so
//! the controller can run outside a browser.

use crate::config::StorageKeys;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Cannot write '{0}' to storage")]
    CannotWrite(String),
    #[error("Cannot encode session marker")]
    CannotEncode,
}

/// String key-value storage that survives page reloads.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&self, key: &str);
}

/// Moves the user back to the application's entry screen.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn go_to_entry(&self);
}

/// Blocking yes/no question asked before destructive actions.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Who is logged in, for display, and the token used to call the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub email: String,
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LoggedInUser {
    email: String,
}

impl SessionContext {
    /// Reads the persisted session, if any.
    ///
    /// A missing marker is not an error. A marker that is not valid JSON is
    /// logged and treated as missing.
    pub fn load(store: &impl SessionStore, keys: &StorageKeys) -> Option<Self> {
        let raw = store.get(&keys.logged_in_user)?;
        match serde_json::from_str::<LoggedInUser>(&raw) {
            Ok(user) => Some(Self {
                email: user.email,
                token: store.get(&keys.token),
            }),
            Err(e) => {
                warn!("Ignoring malformed session marker: {e}");
                None
            }
        }
    }

    /// Starts a session by persisting the user marker and token.
    pub fn begin(
        store: &impl SessionStore,
        keys: &StorageKeys,
        email: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, Error> {
        let email = email.into();
        let marker = serde_json::to_string(&LoggedInUser {
            email: email.clone(),
        })
        .map_err(|_| Error::CannotEncode)?;
        store.set(&keys.logged_in_user, &marker)?;
        match &token {
            Some(token) => store.set(&keys.token, token)?,
            None => store.remove(&keys.token),
        }
        info!("Session started for {email}");
        Ok(Self { email, token })
    }

    /// Ends the session by clearing the persisted token.
    ///
    /// The user marker is left in place; it only feeds the display name.
    pub fn end(self, store: &impl SessionStore, keys: &StorageKeys) {
        store.remove(&keys.token);
        info!("Session ended for {}", self.email);
    }
}

/// In-memory `SessionStore` for hosts without browser storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    fn keys() -> StorageKeys {
        StorageKeys::default()
    }

    #[test]
    fn load_without_marker_is_none() {
        let store = MemoryStore::new();
        assert_eq!(SessionContext::load(&store, &keys()), None);
    }

    #[test]
    fn load_reads_email_and_token() {
        // Arrange
        let store = MemoryStore::new();
        store
            .set("loggedInUser", r#"{"email":"ada@example.com","name":"Ada"}"#)
            .unwrap();
        store.set("token", "jwt").unwrap();

        // Act
        let session = SessionContext::load(&store, &keys());

        // Assert
        assert_eq!(
            session,
            Some(SessionContext {
                email: "ada@example.com".to_string(),
                token: Some("jwt".to_string()),
            })
        );
    }

    #[test]
    fn load_ignores_malformed_marker() {
        let store = MemoryStore::new();
        store.set("loggedInUser", "ada@example.com").unwrap();

        assert_eq!(SessionContext::load(&store, &keys()), None);
    }

    #[test]
    fn begin_then_load_round_trips() {
        let store = MemoryStore::new();

        let started =
            SessionContext::begin(&store, &keys(), "ada@example.com", Some("jwt".into())).unwrap();

        assert_eq!(SessionContext::load(&store, &keys()), Some(started));
    }

    #[test]
    fn begin_without_token_clears_stale_token() {
        let store = MemoryStore::new();
        store.set("token", "stale").unwrap();

        let session = SessionContext::begin(&store, &keys(), "ada@example.com", None).unwrap();

        assert_eq!(session.token, None);
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn begin_propagates_storage_failure() {
        let mut store = MockSessionStore::new();
        store
            .expect_set()
            .with(eq("loggedInUser"), always())
            .times(1)
            .returning(|key, _| Err(Error::CannotWrite(key.to_string())));

        let result = SessionContext::begin(&store, &keys(), "ada@example.com", None);

        assert_eq!(result, Err(Error::CannotWrite("loggedInUser".to_string())));
    }

    #[test]
    fn end_removes_only_the_token() {
        // Arrange
        let store = MemoryStore::new();
        let session =
            SessionContext::begin(&store, &keys(), "ada@example.com", Some("jwt".into())).unwrap();

        // Act
        session.end(&store, &keys());

        // Assert
        assert_eq!(store.get("token"), None);
        assert!(store.get("loggedInUser").is_some());
    }
}
