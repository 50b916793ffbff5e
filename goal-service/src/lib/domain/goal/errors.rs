use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::goal::models::GoalId;
use crate::domain::goal::models::SubTaskId;
use crate::domain::object_id::ObjectIdError;

/// Error type for Title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title is required")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all goal-related operations
#[derive(Debug, Clone, Error)]
pub enum GoalError {
    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] ObjectIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("End date {end_date} is before start date {start_date}")]
    InvalidSchedule {
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    },

    /// Absent and owned-by-someone-else are the same outcome
    #[error("Goal not found: {0}")]
    NotFound(GoalId),

    #[error("Subtask not found: {0}")]
    SubTaskNotFound(SubTaskId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
