use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use crate::goal::errors::GoalError;
use crate::goal::errors::TitleError;
use crate::goal::models::Goal;
use crate::goal::models::GoalId;
use crate::goal::models::SubTask;
use crate::goal::models::SubTaskId;
use crate::goal::models::Title;

/// Outward goal representation, field names as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalData {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub subtasks: Vec<SubTaskData>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub progress: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubTaskData {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SubTask> for SubTaskData {
    fn from(subtask: &SubTask) -> Self {
        Self {
            id: subtask.id.to_string(),
            title: subtask.title.as_str().to_string(),
            description: subtask.description.clone(),
            completed: subtask.completed,
            due_date: subtask.due_date,
            created_at: subtask.created_at,
            updated_at: subtask.updated_at,
        }
    }
}

impl From<&Goal> for GoalData {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.to_string(),
            owner_id: goal.owner_id.to_string(),
            title: goal.title.as_str().to_string(),
            description: goal.description.clone(),
            subtasks: goal.subtasks.iter().map(SubTaskData::from).collect(),
            start_date: goal.start_date,
            end_date: goal.end_date,
            completed: goal.completed,
            progress: goal.progress,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

pub(super) fn parse_goal_id(raw: &str) -> Result<GoalId, ApiError> {
    GoalId::from_string(raw).map_err(|e| ApiError::from(GoalError::from(e)))
}

pub(super) fn parse_subtask_id(raw: &str) -> Result<SubTaskId, ApiError> {
    SubTaskId::from_string(raw).map_err(|e| ApiError::from(GoalError::from(e)))
}

/// Optional title on partial updates: blank means "leave as is".
pub(super) fn optional_title(raw: Option<String>) -> Result<Option<Title>, TitleError> {
    raw.filter(|title| !title.trim().is_empty())
        .map(Title::new)
        .transpose()
}

impl From<TitleError> for ApiError {
    fn from(err: TitleError) -> Self {
        ApiError::from(GoalError::from(err))
    }
}
