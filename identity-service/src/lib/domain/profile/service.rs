use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::User;
use crate::domain::account::ports::IdentityStore;
use crate::domain::profile::models::AddressData;
use crate::domain::profile::ports::AddressMapper;
use crate::domain::profile::ports::ProfileServicePort;

/// Domain service for reading and replacing a user's mailing address.
pub struct ProfileService<S, M>
where
    S: IdentityStore,
    M: AddressMapper,
{
    store: Arc<S>,
    mapper: Arc<M>,
}

impl<S, M> ProfileService<S, M>
where
    S: IdentityStore,
    M: AddressMapper,
{
    /// Create a new profile service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Identity store implementation
    /// * `mapper` - Address entity/transfer conversion
    pub fn new(store: Arc<S>, mapper: Arc<M>) -> Self {
        Self { store, mapper }
    }

    async fn user_with_address(&self, email: &str) -> Result<User, AccountError> {
        self.store
            .find_by_email_with_address(email)
            .await?
            .ok_or_else(|| AccountError::UserNotFound(email.to_string()))
    }
}

#[async_trait]
impl<S, M> ProfileServicePort for ProfileService<S, M>
where
    S: IdentityStore,
    M: AddressMapper,
{
    async fn get_user_address(&self, email: &str) -> Result<Option<AddressData>, AccountError> {
        let user = self.user_with_address(email).await?;

        Ok(user.address.as_ref().map(|a| self.mapper.to_data(a)))
    }

    async fn update_user_address(
        &self,
        address: AddressData,
        email: &str,
    ) -> Result<AddressData, AccountError> {
        let mut user = self.user_with_address(email).await?;

        match user.address.as_mut() {
            Some(existing) => {
                existing.first_name = address.first_name.clone();
                existing.last_name = address.last_name.clone();
                existing.street = address.street.clone();
                existing.city = address.city.clone();
                existing.country = address.country.clone();
            }
            None => user.address = Some(self.mapper.to_entity(&address)),
        }

        self.store.update(&user).await?;
        tracing::info!(user_id = %user.id, "User address updated");

        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::Address;
    use crate::domain::account::policy::IdentityResult;
    use crate::outbound::mapping::DirectAddressMapper;
    use crate::outbound::repositories::memory::InMemoryIdentityStore;

    mock! {
        pub TestIdentityStore {}

        #[async_trait]
        impl IdentityStore for TestIdentityStore {
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;
            async fn find_by_email_with_address(&self, email: &str) -> Result<Option<User>, AccountError>;
            async fn check_password(&self, user: &User, password: &str) -> Result<bool, AccountError>;
            async fn create(&self, user: User, password: &str) -> Result<IdentityResult, AccountError>;
            async fn get_roles(&self, user: &User) -> Result<Vec<String>, AccountError>;
            async fn add_to_role(&self, user: &User, role: &str) -> Result<(), AccountError>;
            async fn update(&self, user: &User) -> Result<(), AccountError>;
        }
    }

    fn address(street: &str, city: &str) -> AddressData {
        AddressData {
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            street: street.to_string(),
            city: city.to_string(),
            country: "United Kingdom".to_string(),
        }
    }

    async fn store_with_user() -> Arc<InMemoryIdentityStore> {
        let store = Arc::new(InMemoryIdentityStore::new());
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice Liddell".to_string(),
            None,
        );
        let outcome = store.create(user, "Pa$$w0rd").await.unwrap();
        assert!(outcome.succeeded());
        store
    }

    #[tokio::test]
    async fn test_get_address_without_address_is_none() {
        let store = store_with_user().await;
        let service = ProfileService::new(store, Arc::new(DirectAddressMapper));

        let result = service.get_user_address("alice@example.com").await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_get_address_unknown_user() {
        let store = Arc::new(InMemoryIdentityStore::new());
        let service = ProfileService::new(store, Arc::new(DirectAddressMapper));

        let result = service.get_user_address("ghost@example.com").await;
        assert_eq!(
            result,
            Err(AccountError::UserNotFound("ghost@example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_creates_then_overwrites() {
        let store = store_with_user().await;
        let service = ProfileService::new(Arc::clone(&store), Arc::new(DirectAddressMapper));

        let first = address("7 Dodgson Lane", "Oxford");
        let echoed = service
            .update_user_address(first.clone(), "alice@example.com")
            .await
            .unwrap();
        assert_eq!(echoed, first);
        assert_eq!(
            service.get_user_address("alice@example.com").await.unwrap(),
            Some(first)
        );

        let second = AddressData {
            first_name: "Lorina".to_string(),
            last_name: "Charlotte".to_string(),
            street: "1 Christ Church".to_string(),
            city: "Cambridge".to_string(),
            country: "England".to_string(),
        };
        service
            .update_user_address(second.clone(), "alice@example.com")
            .await
            .unwrap();

        let stored = store
            .find_by_email_with_address("alice@example.com")
            .await
            .unwrap()
            .unwrap()
            .address
            .unwrap();
        assert_eq!(
            stored,
            Address {
                first_name: "Lorina".to_string(),
                last_name: "Charlotte".to_string(),
                street: "1 Christ Church".to_string(),
                city: "Cambridge".to_string(),
                country: "England".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let mut store = MockTestIdentityStore::new();
        store
            .expect_find_by_email_with_address()
            .times(1)
            .returning(|_| Ok(None));
        store.expect_update().times(0);

        let service = ProfileService::new(Arc::new(store), Arc::new(DirectAddressMapper));

        let result = service
            .update_user_address(address("7 Dodgson Lane", "Oxford"), "ghost@example.com")
            .await;
        assert_eq!(
            result,
            Err(AccountError::UserNotFound("ghost@example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_echoes_input_not_stored_state() {
        let mut store = MockTestIdentityStore::new();

        let mut user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice Liddell".to_string(),
            None,
        );
        user.address = Some(Address {
            first_name: "Old".to_string(),
            last_name: "Name".to_string(),
            street: "Old Street".to_string(),
            city: "Old Town".to_string(),
            country: "Nowhere".to_string(),
        });
        store
            .expect_find_by_email_with_address()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        store
            .expect_update()
            .withf(|user| {
                user.address.as_ref().map(|a| a.street.as_str()) == Some("7 Dodgson Lane")
                    && user.address.as_ref().map(|a| a.first_name.as_str()) == Some("Alice")
            })
            .times(1)
            .returning(|_| Ok(()));
        store.expect_find_by_email().times(0);

        let service = ProfileService::new(Arc::new(store), Arc::new(DirectAddressMapper));

        let input = address("7 Dodgson Lane", "Oxford");
        let result = service
            .update_user_address(input.clone(), "alice@example.com")
            .await;
        assert_eq!(result, Ok(input));
    }

    #[tokio::test]
    async fn test_update_store_failure_propagates() {
        let mut store = MockTestIdentityStore::new();

        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice Liddell".to_string(),
            None,
        );
        store
            .expect_find_by_email_with_address()
            .returning(move |_| Ok(Some(user.clone())));
        store
            .expect_update()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("deadlock detected".to_string())));

        let service = ProfileService::new(Arc::new(store), Arc::new(DirectAddressMapper));

        let result = service
            .update_user_address(address("7 Dodgson Lane", "Oxford"), "alice@example.com")
            .await;
        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }
}
