use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::profile::models::AddressData;

pub async fn update_address(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<AddressData>,
) -> Result<ApiSuccess<AddressData>, ApiError> {
    state
        .profile_service
        .update_user_address(body, &caller.email)
        .await
        .map_err(ApiError::from)
        .map(|address| ApiSuccess::new(StatusCode::OK, address))
}
