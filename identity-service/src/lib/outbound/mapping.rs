use crate::domain::account::models::Address;
use crate::domain::profile::models::AddressData;
use crate::domain::profile::ports::AddressMapper;

/// Field-by-field address mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectAddressMapper;

impl AddressMapper for DirectAddressMapper {
    fn to_entity(&self, data: &AddressData) -> Address {
        Address {
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            street: data.street.clone(),
            city: data.city.clone(),
            country: data.country.clone(),
        }
    }

    fn to_data(&self, address: &Address) -> AddressData {
        AddressData {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            country: address.country.clone(),
        }
    }
}
