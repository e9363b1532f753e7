use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Address;
use crate::domain::profile::models::AddressData;

/// Port for profile operations. Never touches tokens.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Read the user's mailing address.
    ///
    /// # Arguments
    /// * `email` - Email of the owning user
    ///
    /// # Returns
    /// The address, or `None` when the user exists but has no address yet
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `DatabaseError` - Identity store failed
    async fn get_user_address(&self, email: &str) -> Result<Option<AddressData>, AccountError>;

    /// Replace the user's mailing address, creating it on first use.
    ///
    /// All five fields are always overwritten.
    ///
    /// # Arguments
    /// * `address` - New address values
    /// * `email` - Email of the owning user
    ///
    /// # Returns
    /// The input address, unchanged
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `DatabaseError` - Identity store failed
    async fn update_user_address(
        &self,
        address: AddressData,
        email: &str,
    ) -> Result<AddressData, AccountError>;
}

/// Converts between the persisted address entity and its transfer representation.
pub trait AddressMapper: Send + Sync + 'static {
    fn to_entity(&self, data: &AddressData) -> Address;

    fn to_data(&self, address: &Address) -> AddressData;
}
