use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::goal_data::parse_goal_id;
use super::goal_data::parse_subtask_id;
use super::goal_data::GoalData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiPath;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn remove_subtask(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    ApiPath((goal_id, subtask_id)): ApiPath<(String, String)>,
) -> Result<ApiSuccess<GoalData>, ApiError> {
    let goal_id = parse_goal_id(&goal_id)?;
    let subtask_id = parse_subtask_id(&subtask_id)?;

    state
        .goal_service
        .remove_subtask(caller.identity_id, goal_id, subtask_id)
        .await
        .map_err(ApiError::from)
        .map(|ref goal| ApiSuccess::new(StatusCode::OK, goal.into()))
}
