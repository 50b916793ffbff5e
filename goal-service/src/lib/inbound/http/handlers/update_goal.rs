use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::goal_data::optional_title;
use super::goal_data::parse_goal_id;
use super::goal_data::GoalData;
use super::ApiError;
use super::ApiJson;
use super::ApiPath;
use super::ApiSuccess;
use crate::goal::errors::TitleError;
use crate::goal::models::UpdateGoalCommand;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn update_goal(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    ApiPath(goal_id): ApiPath<String>,
    ApiJson(body): ApiJson<UpdateGoalRequest>,
) -> Result<ApiSuccess<GoalData>, ApiError> {
    let goal_id = parse_goal_id(&goal_id)?;

    state
        .goal_service
        .update_goal(caller.identity_id, goal_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref goal| ApiSuccess::new(StatusCode::OK, goal.into()))
}

/// HTTP request body for a partial goal update. Absent fields are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateGoalRequest {
    title: Option<String>,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    completed: Option<bool>,
}

impl UpdateGoalRequest {
    fn try_into_command(self) -> Result<UpdateGoalCommand, TitleError> {
        Ok(UpdateGoalCommand {
            title: optional_title(self.title)?,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            completed: self.completed,
        })
    }
}
