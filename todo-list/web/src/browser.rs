//! Browser-backed implementations of the collaborators the task list needs.

use crate::Route;
use gloo_storage::{LocalStorage, Storage};
use todo_list_core::session::{self, Confirm, Navigator, SessionStore};

/// `SessionStore` over `window.localStorage`.
///
/// Values are stored as raw strings so the session marker stays readable by
/// anything else sharing the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), session::Error> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|_| session::Error::CannotWrite(key.to_string()))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Sends the user back to the entry screen through the router.
#[derive(Clone, Copy)]
pub struct RouterNavigator(pub dioxus::router::prelude::Navigator);

impl Navigator for RouterNavigator {
    fn go_to_entry(&self) {
        let _ = self.0.replace(Route::Entry {});
    }
}

/// Asks through `window.confirm`. Answers "no" when there is no window.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
