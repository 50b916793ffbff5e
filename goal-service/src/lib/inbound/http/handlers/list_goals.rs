use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::goal_data::GoalData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<Vec<GoalData>>, ApiError> {
    state
        .goal_service
        .list_goals(caller.identity_id)
        .await
        .map_err(ApiError::from)
        .map(|goals| ApiSuccess::new(StatusCode::OK, goals.iter().map(GoalData::from).collect()))
}
