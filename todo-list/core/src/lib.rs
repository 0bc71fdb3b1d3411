//! Core models and task list logic for the to-do application.
pub mod client;
pub mod config;
pub mod controller;
pub mod filter;
pub mod session;
pub mod task;

pub use client::{ErrorKind, HttpTaskClient, TaskClient};
pub use config::{ClientConfig, StorageKeys};
pub use controller::{EditState, TaskListController};
pub use filter::{TaskFilter, filter_tasks};
pub use session::{Confirm, MemoryStore, Navigator, SessionContext, SessionStore};
pub use task::{Estimate, Status, Task, TaskField, TaskId};
