use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn email_exists(
    State(state): State<AppState>,
    Query(params): Query<EmailExistsParams>,
) -> Result<ApiSuccess<bool>, ApiError> {
    state
        .account_service
        .check_email_exists(&params.email)
        .await
        .map_err(ApiError::from)
        .map(|exists| ApiSuccess::new(StatusCode::OK, exists))
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailExistsParams {
    email: String,
}
