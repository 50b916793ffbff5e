use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::goal_data::parse_goal_id;
use super::goal_data::GoalData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiPath;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn get_goal(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    ApiPath(goal_id): ApiPath<String>,
) -> Result<ApiSuccess<GoalData>, ApiError> {
    let goal_id = parse_goal_id(&goal_id)?;

    state
        .goal_service
        .get_goal(caller.identity_id, goal_id)
        .await
        .map_err(ApiError::from)
        .map(|ref goal| ApiSuccess::new(StatusCode::OK, goal.into()))
}
