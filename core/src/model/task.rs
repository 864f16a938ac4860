use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono_tz::Tz;
use log::debug;

use crate::error::TaskError;

/// Task identifier: the letter `T` followed by exactly three digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = s
            .strip_prefix('T')
            .is_some_and(|rest| rest.len() == 3 && rest.chars().all(|c| c.is_ascii_digit()));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(TaskError::InvalidTaskId(s.to_string()))
        }
    }
}

/// Urgency bucket. Level 1 (high) to 3 (low); lower level is more urgent.
/// The derive order makes `High` sort first, so ordering follows urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Priority::High),
            2 => Some(Priority::Medium),
            3 => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Task state. Status updates are free text by contract, so anything outside
/// the three known values lands in `Other` rather than being rejected.
/// Only `Completed` has behavioral meaning (it gates the overdue check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Pending" => Status::Pending,
            "In Progress" => Status::InProgress,
            "Completed" => Status::Completed,
            other => Status::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => f.write_str("Pending"),
            Status::InProgress => f.write_str("In Progress"),
            Status::Completed => f.write_str("Completed"),
            Status::Other(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_at: DateTime<Tz>,
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    pub fn new(
        id: TaskId,
        title: String,
        priority: Priority,
        description: String,
        due_at: DateTime<Tz>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_at,
            priority,
            status: Status::default(),
        }
    }

    /// Overwrites the status unconditionally and returns the previous value
    /// so callers can announce the change.
    pub fn update_status(&mut self, status: Status) -> Status {
        let previous = std::mem::replace(&mut self.status, status);
        debug!("task {} status: {} -> {}", self.id, previous, self.status);
        previous
    }

    /// A task is overdue once its due time has passed, unless completed.
    pub fn is_overdue(&self, now: DateTime<Tz>) -> bool {
        self.due_at < now && self.status != Status::Completed
    }

    /// Insertion-time ranking score: `level * 1000 - seconds_until_due`.
    /// The store records it once when the task is added and never
    /// recomputes it; recommendation does not use it.
    pub fn priority_score(&self, now: DateTime<Tz>) -> i64 {
        let seconds_until_due = (self.due_at - now).num_seconds();
        i64::from(self.priority.level()) * 1000 - seconds_until_due
    }
}
