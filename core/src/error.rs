use thiserror::Error;

use crate::model::task::TaskId;

/// Everything that can go wrong while manipulating tasks. All of these are
/// recoverable: the shell prints them and returns to the menu.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Invalid task id '{0}': expected 'T' followed by three digits, e.g. T001")]
    InvalidTaskId(String),

    #[error("Task {0} already exists")]
    DuplicateTaskId(TaskId),

    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    #[error("Could not parse '{0}' as a due date (expected YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM)")]
    InvalidDateTime(String),
}
