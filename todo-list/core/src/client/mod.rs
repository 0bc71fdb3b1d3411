//! Remote task client.
//!
//! This module defines the contract the task list needs from the backend:
//! - A closed error enumeration so callers can react per failure kind
//! - The `TaskClient` trait covering list, create, update and delete
//!
//! The contract is transport-agnostic. An HTTP implementation built on
//! `reqwest` lives in the `http` submodule and runs both natively and in the
//! browser.

use crate::task::{Task, TaskId};
use thiserror::Error;

pub mod http;

pub use http::HttpTaskClient;

/// Failures reported by a remote task operation.
///
/// None of these are retried by the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request never produced a response
    #[error("Network failure: {0}")]
    Network(String),
    /// The server rejected the request contents
    #[error("Rejected by server: {0}")]
    Validation(String),
    /// The task does not exist on the server
    #[error("Task not found")]
    NotFound,
    /// Any other unsuccessful or unreadable response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Category of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Validation,
    NotFound,
    Server,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(_) => ErrorKind::Network,
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound => ErrorKind::NotFound,
            Error::Server { .. } => ErrorKind::Server,
        }
    }
}

/// Operations the backend offers on the task collection.
///
/// Every call is a single round trip with no retry or timeout policy.
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait TaskClient {
    /// Fetches every task visible to the current user.
    async fn list_tasks(&self) -> Result<Vec<Task>, Error>;
    /// Sends a draft and returns the stored record, including its new id.
    async fn create_task(&self, draft: &Task) -> Result<Task, Error>;
    /// Replaces the stored record with `task`. The task must carry an id.
    async fn update_task(&self, task: &Task) -> Result<(), Error>;
    async fn delete_task(&self, id: TaskId) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        assert_eq!(Error::Network("down".into()).kind(), ErrorKind::Network);
        assert_eq!(Error::Validation("bad".into()).kind(), ErrorKind::Validation);
        assert_eq!(Error::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::Server {
                status: 503,
                message: "busy".into()
            }
            .kind(),
            ErrorKind::Server
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::Server {
                status: 500,
                message: "boom".into()
            }
            .to_string(),
            "Server error (500): boom"
        );
        assert_eq!(Error::NotFound.to_string(), "Task not found");
    }
}
