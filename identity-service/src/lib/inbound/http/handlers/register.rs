use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserResponseData;
use crate::account::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    state
        .account_service
        .register(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::CREATED, result.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    display_name: String,
    password: String,
    #[serde(default)]
    phone_number: Option<String>,
}

impl RegisterRequest {
    fn into_command(self) -> RegisterUserCommand {
        RegisterUserCommand {
            username: self.username,
            email: self.email,
            display_name: self.display_name,
            password: self.password,
            phone_number: self.phone_number.filter(|p| !p.trim().is_empty()),
        }
    }
}
