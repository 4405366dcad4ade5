use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaskdeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: &[Status] = &[Status::Todo, Status::InProgress, Status::Done];

    /// Lanes in board display order.
    pub const BOARD_COLUMNS: &[Status] = &[Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Status::Todo),
            "in_progress" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The lane to the right of `status` on the board, if any.
pub fn next_status(status: Status) -> Option<Status> {
    match status {
        Status::Todo => Some(Status::InProgress),
        Status::InProgress => Some(Status::Done),
        Status::Done => None,
    }
}

/// The lane to the left of `status` on the board, if any.
pub fn prev_status(status: Status) -> Option<Status> {
    match status {
        Status::Todo => None,
        Status::InProgress => Some(Status::Todo),
        Status::Done => Some(Status::InProgress),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: &[Priority] = &[Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Priority::High => "!!",
            Priority::Medium => "!",
            Priority::Low => "-",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A task record as the store returns it. Identifiers and timestamps are
/// assigned by the store, never by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTask {
    pub fn validate(&self) -> Result<(), TaskdeckError> {
        if self.title.trim().is_empty() {
            return Err(TaskdeckError::InvalidInput("title must not be empty".into()));
        }
        Ok(())
    }
}

/// Partial update. `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTask {
    pub fn validate(&self) -> Result<(), TaskdeckError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TaskdeckError::InvalidInput("title must not be empty".into()));
            }
        }
        Ok(())
    }
}

/// Server-side listing filter, distinct from the client-side
/// [`FilterState`](crate::filter::FilterState) pipeline.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project_id: Option<i64>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub limit: Option<i64>,
}
