use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::goal::errors::TitleError;
use crate::domain::identity::models::IdentityId;
use crate::domain::object_id::ObjectId;
use crate::domain::object_id::ObjectIdError;

/// Goal unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoalId(pub ObjectId);

impl GoalId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a goal ID from its 24-character hex form.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not 24 hex characters
    pub fn from_string(s: &str) -> Result<Self, ObjectIdError> {
        ObjectId::parse_str(s).map(GoalId)
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subtask identifier, unique within its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubTaskId(pub ObjectId);

impl SubTaskId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn from_string(s: &str) -> Result<Self, ObjectIdError> {
        ObjectId::parse_str(s).map(SubTaskId)
    }
}

impl Default for SubTaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Title value object shared by goals and subtasks.
///
/// Ensures title is not blank and within 200 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MAX_LENGTH: usize = 200;

    /// Create a new validated title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - Title exceeds 200 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(TitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A step of a goal. Lives only inside its parent goal.
#[derive(Debug, Clone, PartialEq)]
pub struct SubTask {
    pub id: SubTaskId,
    pub title: Title,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Goal aggregate root.
///
/// `completed` and `progress` are derived from `subtasks`; every path that
/// hands a goal out runs it through `progress::recompute` first.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: GoalId,
    pub owner_id: IdentityId,
    pub title: Title,
    pub description: Option<String>,
    pub subtasks: Vec<SubTask>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub progress: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn subtask_mut(&mut self, id: SubTaskId) -> Option<&mut SubTask> {
        self.subtasks.iter_mut().find(|subtask| subtask.id == id)
    }
}

/// Command to create a goal.
#[derive(Debug)]
pub struct CreateGoalCommand {
    pub title: Title,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial goal update. `None` leaves the field untouched.
///
/// `completed` is accepted for compatibility but the stored value is always
/// recomputed from subtasks before it is persisted.
#[derive(Debug, Default)]
pub struct UpdateGoalCommand {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

/// Command to append a subtask to a goal.
#[derive(Debug)]
pub struct AddSubTaskCommand {
    pub title: Title,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial subtask update. `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct UpdateSubTaskCommand {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert!(Title::new("Learn Go".to_string()).is_ok());
        assert_eq!(Title::new("".to_string()), Err(TitleError::Empty));
        assert_eq!(Title::new("   ".to_string()), Err(TitleError::Empty));
        assert_eq!(
            Title::new("x".repeat(201)),
            Err(TitleError::TooLong {
                max: 200,
                actual: 201
            })
        );
    }

    #[test]
    fn test_goal_id_parsing() {
        let id = GoalId::new();
        assert_eq!(GoalId::from_string(&id.to_string()), Ok(id));
        assert!(GoalId::from_string("123").is_err());
    }
}
