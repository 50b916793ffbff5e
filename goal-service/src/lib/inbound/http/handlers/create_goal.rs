use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::goal_data::GoalData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::goal::errors::TitleError;
use crate::goal::models::CreateGoalCommand;
use crate::goal::models::Title;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    ApiJson(body): ApiJson<CreateGoalRequest>,
) -> Result<ApiSuccess<GoalData>, ApiError> {
    state
        .goal_service
        .create_goal(caller.identity_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref goal| ApiSuccess::new(StatusCode::CREATED, goal.into()))
}

/// HTTP request body for creating a goal (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateGoalRequest {
    #[serde(default)]
    title: String,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

impl CreateGoalRequest {
    fn try_into_command(self) -> Result<CreateGoalCommand, TitleError> {
        Ok(CreateGoalCommand {
            title: Title::new(self.title)?,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}
