use std::collections::HashMap;

use async_trait::async_trait;
use auth::PasswordHasher;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::normalize;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::policy::IdentityPolicy;
use crate::domain::account::policy::IdentityResult;
use crate::domain::account::policy::Uniqueness;
use crate::domain::account::ports::IdentityStore;

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    roles: HashMap<UserId, Vec<String>>,
}

impl State {
    fn by_email(&self, email: &str) -> Option<&User> {
        let key = normalize(email);
        self.users.values().find(|u| u.normalized_email() == key)
    }
}

/// Identity store kept in process memory.
///
/// Applies the same identity policy and password hashing as the Postgres store. Suited to
/// tests and local runs; nothing survives a restart.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    state: RwLock<State>,
    policy: IdentityPolicy,
    password_hasher: PasswordHasher,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: IdentityPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let state = self.state.read().await;

        Ok(state.by_email(email).map(|u| User {
            address: None,
            ..u.clone()
        }))
    }

    async fn find_by_email_with_address(
        &self,
        email: &str,
    ) -> Result<Option<User>, AccountError> {
        let state = self.state.read().await;

        Ok(state.by_email(email).cloned())
    }

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AccountError> {
        Ok(self.password_hasher.verify(password, &user.password_hash)?)
    }

    async fn create(&self, mut user: User, password: &str) -> Result<IdentityResult, AccountError> {
        let mut state = self.state.write().await;

        let username = user.normalized_username();
        let uniqueness = Uniqueness {
            user_name_taken: state
                .users
                .values()
                .any(|u| u.normalized_username() == username),
            email_taken: state.by_email(&user.email).is_some(),
        };

        let outcome = self.policy.validate_new_user(&user, password, uniqueness);
        if !outcome.succeeded() {
            return Ok(outcome);
        }

        user.password_hash = self.password_hasher.hash(password)?;
        state.users.insert(user.id, user);

        Ok(IdentityResult::success())
    }

    async fn get_roles(&self, user: &User) -> Result<Vec<String>, AccountError> {
        let state = self.state.read().await;

        Ok(state.roles.get(&user.id).cloned().unwrap_or_default())
    }

    async fn add_to_role(&self, user: &User, role: &str) -> Result<(), AccountError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&user.id) {
            return Err(AccountError::UserNotFound(user.email.clone()));
        }

        let roles = state.roles.entry(user.id).or_default();
        if !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), AccountError> {
        let mut state = self.state.write().await;

        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| AccountError::UserNotFound(user.email.clone()))?;

        stored.username = user.username.clone();
        stored.email = user.email.clone();
        stored.display_name = user.display_name.clone();
        stored.phone_number = user.phone_number.clone();
        if let Some(address) = &user.address {
            stored.address = Some(address.clone());
        }

        Ok(())
    }
}
