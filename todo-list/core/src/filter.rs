//! Read-only projection of the task list for display.

use crate::task::{Status, Task};

pub const COMPLETED_KEY: &str = "done";
pub const OPEN_KEY: &str = "open";

/// Criteria a task must meet to be shown. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub completed: Option<bool>,
    /// Case-insensitive text searched in title and category.
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the status criterion from a form value. Unknown values clear it.
    pub fn with_status_key(mut self, key: &str) -> Self {
        self.status = key.parse().ok();
        self
    }

    /// Form value for the status criterion; empty when unset.
    pub fn status_key(&self) -> &'static str {
        self.status.map(|status| status.label()).unwrap_or_default()
    }

    /// Sets the completion criterion from a form value: `done`, `open`, or
    /// anything else for no criterion.
    pub fn with_completion_key(mut self, key: &str) -> Self {
        self.completed = match key {
            COMPLETED_KEY => Some(true),
            OPEN_KEY => Some(false),
            _ => None,
        };
        self
    }

    pub fn completion_key(&self) -> &'static str {
        match self.completed {
            Some(true) => COMPLETED_KEY,
            Some(false) => OPEN_KEY,
            None => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.completed.is_none() && self.needle().is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|status| status != task.status) {
            return false;
        }
        if self.completed.is_some_and(|completed| completed != task.completed) {
            return false;
        }
        match self.needle() {
            Some(needle) => {
                task.title.to_lowercase().contains(&needle)
                    || task.category.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase)
    }
}

/// Returns the tasks matching `filter`, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}
