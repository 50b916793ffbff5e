use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::goal_data::parse_goal_id;
use super::goal_data::GoalData;
use super::ApiError;
use super::ApiJson;
use super::ApiPath;
use super::ApiSuccess;
use crate::goal::errors::TitleError;
use crate::goal::models::AddSubTaskCommand;
use crate::goal::models::Title;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn add_subtask(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    ApiPath(goal_id): ApiPath<String>,
    ApiJson(body): ApiJson<AddSubTaskRequest>,
) -> Result<ApiSuccess<GoalData>, ApiError> {
    let goal_id = parse_goal_id(&goal_id)?;

    state
        .goal_service
        .add_subtask(caller.identity_id, goal_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref goal| ApiSuccess::new(StatusCode::CREATED, goal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddSubTaskRequest {
    #[serde(default)]
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl AddSubTaskRequest {
    fn try_into_command(self) -> Result<AddSubTaskCommand, TitleError> {
        Ok(AddSubTaskCommand {
            title: Title::new(self.title)?,
            description: self.description,
            due_date: self.due_date,
        })
    }
}
