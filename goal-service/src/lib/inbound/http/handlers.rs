use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::goal::errors::GoalError;
use crate::identity::errors::IdentityError;

pub mod add_subtask;
pub mod create_goal;
pub mod delete_goal;
pub mod get_goal;
pub mod goal_data;
pub mod health;
pub mod list_goals;
pub mod login;
pub mod register;
pub mod remove_subtask;
pub mod update_goal;
pub mod update_subtask;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Transport-level error. Messages are safe to show to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    ServiceUnavailable(String),
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InternalServerError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::UnprocessableEntity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            }
        }
    }
}

/// JSON body extractor whose rejections use the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections use the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Deserializer text stays in the logs
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(
                "Request body is missing fields or has invalid values".to_string(),
            ),
            JsonRejection::JsonSyntaxError(_) => {
                ApiError::BadRequest("Request body is not valid JSON".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::BadRequest("Expected a JSON request body".to_string())
            }
            _ => ApiError::BadRequest("Request body could not be read".to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameters");
        ApiError::BadRequest("Invalid path parameters".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = match self {
            ApiError::InternalServerError(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        };

        (status, Json(ApiResponseBody::new_error(status, kind, message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UsernameAlreadyExists(_) | IdentityError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            IdentityError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            IdentityError::InvalidUsername(_)
            | IdentityError::InvalidEmail(_)
            | IdentityError::InvalidPassword(_)
            | IdentityError::InvalidIdentityId(_) => ApiError::UnprocessableEntity(err.to_string()),
            IdentityError::DatabaseError(_) => {
                tracing::error!(error = %err, "Credential store failure");
                ApiError::ServiceUnavailable("Service temporarily unavailable".to_string())
            }
            IdentityError::Hashing(_) | IdentityError::TokenIssuing(_) => {
                tracing::error!(error = %err, "Identity operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<GoalError> for ApiError {
    fn from(err: GoalError) -> Self {
        match err {
            GoalError::NotFound(_) | GoalError::SubTaskNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            GoalError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            GoalError::InvalidTitle(_) | GoalError::InvalidSchedule { .. } => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            GoalError::DatabaseError(_) => {
                tracing::error!(error = %err, "Goal store failure");
                ApiError::ServiceUnavailable("Service temporarily unavailable".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: &str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                kind: kind.to_string(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: String,
    pub message: String,
}
