use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_subtask::add_subtask;
use super::handlers::create_goal::create_goal;
use super::handlers::delete_goal::delete_goal;
use super::handlers::get_goal::get_goal;
use super::handlers::health::health;
use super::handlers::list_goals::list_goals;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::remove_subtask::remove_subtask;
use super::handlers::update_goal::update_goal;
use super::handlers::update_subtask::update_subtask;
use super::middleware::authenticate as auth_middleware;
use crate::goal::ports::GoalServicePort;
use crate::identity::ports::IdentityServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub goal_service: Arc<dyn GoalServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    goal_service: Arc<dyn GoalServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        identity_service,
        goal_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/goals", post(create_goal).get(list_goals))
        .route(
            "/api/goals/:goal_id",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/api/goals/:goal_id/subtasks", post(add_subtask))
        .route(
            "/api/goals/:goal_id/subtasks/:subtask_id",
            patch(update_subtask).delete(remove_subtask),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
