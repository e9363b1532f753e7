use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::profile::models::AddressData;

pub async fn get_address(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Option<AddressData>>, ApiError> {
    state
        .profile_service
        .get_user_address(&caller.email)
        .await
        .map_err(ApiError::from)
        .map(|address| ApiSuccess::new(StatusCode::OK, address))
}
