//! The task record exchanged with the backend and the per-field coercions
//! applied when a user edits a task inline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Server-assigned task identifier.
pub type TaskId = u64;

/// Label some views render in front of the category; stripped on edit.
pub const CATEGORY_PREFIX: &str = "Category: ";

/// A single to-do item.
///
/// A task built locally with [`Task::draft`] has no `id` until the backend
/// assigns one. Tasks without an id are never sent for update or deletion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Estimate>,
}

/// Workflow label of a task. The serialized form is the display label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

/// Estimated effort for a task.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Estimate {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Task {
    /// Builds a draft with the defaults used for every newly added task.
    pub fn draft(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            completed: false,
            status: Status::ToDo,
            category: String::new(),
            due_date: None,
            importance: None,
            estimate: None,
        }
    }

    /// Whether the backend has assigned this task an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Category as shown in editable views, with [`CATEGORY_PREFIX`] in front.
    ///
    /// Writing the label back through [`Task::apply_field`] leaves the
    /// category unchanged.
    pub fn category_label(&self) -> String {
        format!("{CATEGORY_PREFIX}{}", self.category)
    }

    /// Writes `raw` into `field`, coercing it the same way for every caller.
    ///
    /// The input is trimmed first. Unparseable due dates clear the due date and
    /// unparseable estimates become zero; neither is reported as an error.
    pub fn apply_field(&mut self, field: TaskField, raw: &str) {
        let value = raw.trim();
        match field {
            TaskField::Title => self.title = value.to_string(),
            TaskField::Category => {
                self.category = value
                    .strip_prefix(CATEGORY_PREFIX.trim_end())
                    .unwrap_or(value)
                    .trim_start()
                    .to_string()
            }
            TaskField::DueDate => self.due_date = parse_due_date(value),
            TaskField::EstimateValue => {
                self.estimate.get_or_insert_with(Estimate::default).value = parse_estimate(value)
            }
            TaskField::Importance => self.importance = Some(value.to_string()),
        }
    }
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Done];

    pub fn label(&self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskFieldError {
    #[error("Unknown task field '{0}'")]
    UnknownField(String),
    #[error("Unknown task status '{0}'")]
    UnknownStatus(String),
}

impl FromStr for Status {
    type Err = TaskFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaskFieldError::UnknownStatus(s.to_string()))
    }
}

/// The inline-editable fields of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Title,
    Category,
    DueDate,
    EstimateValue,
    Importance,
}

impl TaskField {
    pub const ALL: [TaskField; 5] = [
        TaskField::Title,
        TaskField::Category,
        TaskField::DueDate,
        TaskField::EstimateValue,
        TaskField::Importance,
    ];

    /// Name the UI uses to refer to the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskField::Title => "title",
            TaskField::Category => "category",
            TaskField::DueDate => "dueDate",
            TaskField::EstimateValue => "estimateValue",
            TaskField::Importance => "importance",
        }
    }
}

impl FromStr for TaskField {
    type Err = TaskFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(TaskField::Title),
            "category" => Ok(TaskField::Category),
            "dueDate" => Ok(TaskField::DueDate),
            "estimateValue" => Ok(TaskField::EstimateValue),
            "importance" => Ok(TaskField::Importance),
            other => Err(TaskFieldError::UnknownField(other.to_string())),
        }
    }
}

impl Display for TaskField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|date| date.and_utc())
        })
}

fn parse_estimate(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(0.0)
}
