use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// User aggregate entity.
///
/// Owns at most one mailing address. The password hash is opaque to the domain and only
/// read or written by identity stores.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved user from registration data.
    ///
    /// The password hash stays empty until an identity store persists the user.
    pub fn new(
        username: String,
        email: String,
        display_name: String,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            display_name,
            phone_number,
            password_hash: String::new(),
            address: None,
            created_at: Utc::now(),
        }
    }

    /// Lookup key for the email.
    pub fn normalized_email(&self) -> String {
        normalize(&self.email)
    }

    /// Lookup key for the username.
    pub fn normalized_username(&self) -> String {
        normalize(&self.username)
    }
}

/// Case-insensitive lookup key for emails and usernames.
pub fn normalize(value: &str) -> String {
    value.to_uppercase()
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mailing address owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

/// Command to authenticate with email and password.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Command to register a new user.
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub phone_number: Option<String>,
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}

/// Payload returned after login, registration and lookup: who the user is plus a fresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResult {
    pub display_name: String,
    pub email: String,
    pub token: String,
}
