use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::goal_data::optional_title;
use super::goal_data::parse_goal_id;
use super::goal_data::parse_subtask_id;
use super::goal_data::GoalData;
use super::ApiError;
use super::ApiJson;
use super::ApiPath;
use super::ApiSuccess;
use crate::goal::errors::TitleError;
use crate::goal::models::UpdateSubTaskCommand;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn update_subtask(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    ApiPath((goal_id, subtask_id)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<UpdateSubTaskRequest>,
) -> Result<ApiSuccess<GoalData>, ApiError> {
    let goal_id = parse_goal_id(&goal_id)?;
    let subtask_id = parse_subtask_id(&subtask_id)?;

    state
        .goal_service
        .update_subtask(
            caller.identity_id,
            goal_id,
            subtask_id,
            body.try_into_command()?,
        )
        .await
        .map_err(ApiError::from)
        .map(|ref goal| ApiSuccess::new(StatusCode::OK, goal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateSubTaskRequest {
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    due_date: Option<DateTime<Utc>>,
}

impl UpdateSubTaskRequest {
    fn try_into_command(self) -> Result<UpdateSubTaskCommand, TitleError> {
        Ok(UpdateSubTaskCommand {
            title: optional_title(self.title)?,
            description: self.description,
            completed: self.completed,
            due_date: self.due_date,
        })
    }
}
