use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::email_exists::email_exists;
use super::handlers::get_address::get_address;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_address::update_address;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::profile::ports::ProfileServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
    pub token_issuer: Arc<TokenIssuer>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    profile_service: Arc<dyn ProfileServicePort>,
    token_issuer: Arc<TokenIssuer>,
) -> Router {
    let state = AppState {
        account_service,
        profile_service,
        token_issuer,
    };

    let public_routes = Router::new()
        .route("/api/authentication/login", post(login))
        .route("/api/authentication/register", post(register))
        .route("/api/authentication/email-exists", get(email_exists));

    let protected_routes = Router::new()
        .route("/api/authentication/current-user", get(current_user))
        .route(
            "/api/authentication/address",
            get(get_address).put(update_address),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
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
