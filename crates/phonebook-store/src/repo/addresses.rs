use crate::backend::KvBackend;
use crate::error::{Result, StoreError};
use phonebook_core::domain::{Address, CustomerAddress, PhoneNumber};

/// Address records keyed by canonical phone number.
///
/// Every method is a single backend round trip. Absence and conflicts are
/// ordinary results (`None` / `false`); only backend failures are errors.
pub struct AddressesRepo<'a> {
    backend: &'a dyn KvBackend,
}

impl<'a> AddressesRepo<'a> {
    pub fn new(backend: &'a dyn KvBackend) -> Self {
        Self { backend }
    }

    pub async fn fetch(&self, phone: &PhoneNumber) -> Result<Option<CustomerAddress>> {
        let key = phone.storage_key();
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };
        let address = Address::new(raw).map_err(|source| StoreError::CorruptValue {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(CustomerAddress::new(phone.clone(), address)))
    }

    /// Returns `false` without touching the record when the phone is taken.
    pub async fn create(&self, record: &CustomerAddress) -> Result<bool> {
        self.backend
            .set_if_absent(record.phone.storage_key(), record.address.as_str())
            .await
    }

    /// Returns `false` without writing when the phone is not registered.
    pub async fn update(&self, record: &CustomerAddress) -> Result<bool> {
        self.backend
            .set_if_present(record.phone.storage_key(), record.address.as_str())
            .await
    }

    pub async fn remove(&self, phone: &PhoneNumber) -> Result<bool> {
        let removed = self.backend.delete(phone.storage_key()).await?;
        Ok(removed > 0)
    }
}
