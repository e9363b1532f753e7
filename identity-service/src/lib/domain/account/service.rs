use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;

use crate::domain::account::claims::build_claims;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterUserCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserResult;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::IdentityStore;

/// Domain service implementation for the authentication workflow.
///
/// Credentials and user records live in the injected identity store; tokens come from the
/// shared token issuer. Holds no mutable state between calls.
pub struct AccountService<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
    token_issuer: Arc<TokenIssuer>,
}

impl<S> AccountService<S>
where
    S: IdentityStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Identity store implementation
    /// * `token_issuer` - Signs claims into bearer tokens
    pub fn new(store: Arc<S>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            token_issuer,
        }
    }

    /// Build claims from the user's current roles and sign a new token.
    pub async fn create_token(&self, user: &User) -> Result<String, AccountError> {
        let roles = self.store.get_roles(user).await?;
        let claims = build_claims(user, roles)?;
        Ok(self.token_issuer.issue(&claims)?)
    }

    async fn user_result(&self, user: &User) -> Result<UserResult, AccountError> {
        Ok(UserResult {
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            token: self.create_token(user).await?,
        })
    }
}

#[async_trait]
impl<S> AccountServicePort for AccountService<S>
where
    S: IdentityStore,
{
    async fn login(&self, command: LoginCommand) -> Result<UserResult, AccountError> {
        let user = match self.store.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(email = %command.email, "Login rejected: unknown email");
                return Err(AccountError::Unauthorized("Incorrect Email".to_string()));
            }
        };

        if !self.store.check_password(&user, &command.password).await? {
            tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AccountError::Unauthorized("Incorrect Password".to_string()));
        }

        let result = self.user_result(&user).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(result)
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<UserResult, AccountError> {
        let user = User::new(
            command.username,
            command.email,
            command.display_name,
            command.phone_number,
        );

        let outcome = self.store.create(user.clone(), &command.password).await?;
        if !outcome.succeeded() {
            let errors = outcome.into_descriptions();
            tracing::warn!(
                email = %user.email,
                error_count = errors.len(),
                "Registration rejected by identity store"
            );
            return Err(AccountError::RegisterValidation(errors));
        }

        let result = self.user_result(&user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(result)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<UserResult, AccountError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccountError::UserNotFound(email.to_string()))?;

        self.user_result(&user).await
    }

    async fn check_email_exists(&self, email: &str) -> Result<bool, AccountError> {
        Ok(self.store.find_by_email(email).await?.is_some())
    }
}
