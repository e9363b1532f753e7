use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterUserCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserResult;
use crate::domain::account::policy::IdentityResult;

/// Port for the authentication workflow.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Display name, email and a freshly issued token
    ///
    /// # Errors
    /// * `Unauthorized("Incorrect Email")` - No user with this email
    /// * `Unauthorized("Incorrect Password")` - Password does not match
    /// * `Token` - Claims could not be built or signed
    /// * `DatabaseError` - Identity store failed
    async fn login(&self, command: LoginCommand) -> Result<UserResult, AccountError>;

    /// Create a user and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Registration data including the plaintext password
    ///
    /// # Returns
    /// Display name, email and a freshly issued token
    ///
    /// # Errors
    /// * `RegisterValidation` - Every rule the identity store rejected the user for
    /// * `Token` - Claims could not be built or signed
    /// * `DatabaseError` - Identity store failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserResult, AccountError>;

    /// Look up a user and issue a brand new token for it.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Token` - Claims could not be built or signed
    /// * `DatabaseError` - Identity store failed
    async fn get_user_by_email(&self, email: &str) -> Result<UserResult, AccountError>;

    /// Whether a user with this email exists. Never issues a token.
    ///
    /// # Errors
    /// * `DatabaseError` - Identity store failed
    async fn check_email_exists(&self, email: &str) -> Result<bool, AccountError>;
}

/// Identity store owning user records, credentials and role memberships.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Retrieve user by email address, without the address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Retrieve user by email address with its address eagerly loaded.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email_with_address(&self, email: &str)
        -> Result<Option<User>, AccountError>;

    /// Check a plaintext password against the user's stored credential.
    ///
    /// # Errors
    /// * `Password` - Stored credential is unreadable
    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AccountError>;

    /// Persist a new user with the given password.
    ///
    /// Uniqueness and password policy violations are reported in the result, not as errors.
    ///
    /// # Errors
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User, password: &str) -> Result<IdentityResult, AccountError>;

    /// Role names the user belongs to, in a stable order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_roles(&self, user: &User) -> Result<Vec<String>, AccountError>;

    /// Add the user to a role, creating the role if needed.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_to_role(&self, user: &User, role: &str) -> Result<(), AccountError>;

    /// Write back profile fields and the owned address.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: &User) -> Result<(), AccountError>;
}
