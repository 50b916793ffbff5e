use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::identity::models::IdentityId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Identity resolved from the request's bearer token.
///
/// Inserted into the extensions of exactly one request; handlers take it
/// by value and pass it on to the domain explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub identity_id: IdentityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Resolve a raw `Authorization` header value to an identity.
///
/// The value must be exactly two space-separated parts, the first being the
/// literal `Bearer`.
pub fn authorize_request(
    authenticator: &Authenticator,
    header: Option<&str>,
) -> Result<IdentityId, AccessError> {
    let header = header.ok_or(AccessError::MissingHeader)?;

    let token = match header.split(' ').collect::<Vec<_>>().as_slice() {
        [scheme, token] if *scheme == BEARER_SCHEME && !token.is_empty() => *token,
        _ => return Err(AccessError::MalformedHeader),
    };

    let subject = authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token rejected");
        AccessError::InvalidToken
    })?;

    IdentityId::from_string(&subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an identity id");
        AccessError::InvalidToken
    })
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Middleware that validates the bearer token and adds the identity to
/// request extensions. Rejected requests never reach a handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            ApiError::from(AccessError::MalformedHeader).into_response()
        })?),
        None => None,
    };

    let identity_id = authorize_request(&state.authenticator, header)
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut()
        .insert(AuthenticatedIdentity { identity_id });

    Ok(next.run(req).await)
}
