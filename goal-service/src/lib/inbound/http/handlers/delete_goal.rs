use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::goal_data::parse_goal_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiPath;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
    ApiPath(goal_id): ApiPath<String>,
) -> Result<ApiSuccess<DeleteGoalResponseData>, ApiError> {
    let goal_id = parse_goal_id(&goal_id)?;

    state
        .goal_service
        .delete_goal(caller.identity_id, goal_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteGoalResponseData {
                    message: "Goal deleted".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteGoalResponseData {
    pub message: String,
}
