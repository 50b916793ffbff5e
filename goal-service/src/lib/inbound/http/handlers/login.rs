use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::register::SessionResponseData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::identity::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequestBody>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    // No format validation here: a malformed email is just a failed login
    let command = LoginCommand {
        email: body.email,
        password: body.password,
    };

    state
        .identity_service
        .login_user(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
