use auth::JwtError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::UserResult;

pub mod current_user;
pub mod email_exists;
pub mod get_address;
pub mod login;
pub mod register;
pub mod update_address;

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

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    /// Rejected input, with one entry per violated rule.
    BadRequest(String, Vec<String>),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, Vec::new())
            }
            ApiError::BadRequest(msg, errors) => (StatusCode::BAD_REQUEST, msg, errors),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, Vec::new()),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, message, errors)),
        )
            .into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Unauthorized(_) => ApiError::Unauthorized(err.to_string()),
            AccountError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::RegisterValidation(ref errors) => {
                ApiError::BadRequest(err.to_string(), errors.clone())
            }
            AccountError::Token(
                JwtError::Expired
                | JwtError::InvalidSignature
                | JwtError::InvalidIssuer
                | JwtError::InvalidAudience
                | JwtError::Malformed(_),
            ) => ApiError::Unauthorized(err.to_string()),
            AccountError::Token(_)
            | AccountError::Password(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(err.to_string())
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
    pub fn new_error(status_code: StatusCode, message: String, errors: Vec<String>) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message, errors },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Display name, email and bearer token, shared by every endpoint that hands out a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub display_name: String,
    pub email: String,
    pub token: String,
}

impl From<UserResult> for UserResponseData {
    fn from(result: UserResult) -> Self {
        Self {
            display_name: result.display_name,
            email: result.email,
            token: result.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;

    use super::*;

    #[test]
    fn test_account_errors_map_to_status() {
        assert_eq!(
            ApiError::from(AccountError::Unauthorized("Incorrect Email".to_string())),
            ApiError::Unauthorized("Unauthorized: Incorrect Email".to_string())
        );
        assert!(matches!(
            ApiError::from(AccountError::UserNotFound("a@b.c".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::Token(JwtError::Expired)),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::Token(JwtError::MissingClaim(
                "unique_name".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::Password(PasswordError::HashingFailed(
                "out of memory".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_register_validation_keeps_every_message() {
        let err = AccountError::RegisterValidation(vec![
            "Email 'a@b.c' is already taken.".to_string(),
            "Passwords must have at least one digit ('0'-'9').".to_string(),
        ]);

        match ApiError::from(err) {
            ApiError::BadRequest(message, errors) => {
                assert!(message.starts_with("Registration failed"));
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_error_body_omits_empty_errors() {
        let body = ApiResponseBody::new_error(
            StatusCode::UNAUTHORIZED,
            "Unauthorized: Incorrect Password".to_string(),
            Vec::new(),
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status_code"], 401);
        assert_eq!(json["data"]["message"], "Unauthorized: Incorrect Password");
        assert!(json["data"].get("errors").is_none());
    }
}
