use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::{
        address::{AddressForm, DeliveryAddress},
        default_entry, make_default, remove_entry,
    },
    error::{AppError, AppResult},
    store::{KvStore, keys, read_list, write_json},
};

#[derive(Clone)]
pub struct AddressService {
    store: Arc<dyn KvStore>,
}

impl AddressService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<DeliveryAddress> {
        read_list(self.store.as_ref(), keys::ADDRESSES).await
    }

    pub async fn find(&self, id: &str) -> AppResult<DeliveryAddress> {
        self.list()
            .await
            .into_iter()
            .find(|address| address.id == id)
            .ok_or_else(|| AppError::not_found("Address"))
    }

    pub async fn default_address(&self) -> Option<DeliveryAddress> {
        default_entry(&self.list().await).cloned()
    }

    /// The first address saved becomes the default.
    pub async fn add(&self, form: AddressForm) -> AppResult<DeliveryAddress> {
        form.validate()?;
        let mut addresses = self.list().await;
        let address = form.into_address(Uuid::new_v4().to_string(), addresses.is_empty());
        addresses.push(address.clone());
        self.write(&addresses).await?;
        Ok(address)
    }

    /// Replaces the fields; id and default flag are kept.
    pub async fn update(&self, id: &str, form: AddressForm) -> AppResult<DeliveryAddress> {
        form.validate()?;
        let mut addresses = self.list().await;
        let slot = addresses
            .iter_mut()
            .find(|address| address.id == id)
            .ok_or_else(|| AppError::not_found("Address"))?;
        *slot = form.into_address(slot.id.clone(), slot.is_default);
        let updated = slot.clone();
        self.write(&addresses).await?;
        Ok(updated)
    }

    pub async fn set_default(&self, id: &str) -> AppResult<DeliveryAddress> {
        let mut addresses = self.list().await;
        if !make_default(&mut addresses, id) {
            return Err(AppError::not_found("Address"));
        }
        self.write(&addresses).await?;
        addresses
            .into_iter()
            .find(|address| address.id == id)
            .ok_or_else(|| AppError::not_found("Address"))
    }

    /// Deleting the default promotes the first remaining address.
    pub async fn delete(&self, id: &str) -> AppResult<DeliveryAddress> {
        let mut addresses = self.list().await;
        let removed =
            remove_entry(&mut addresses, id).ok_or_else(|| AppError::not_found("Address"))?;
        self.write(&addresses).await?;
        Ok(removed)
    }

    async fn write(&self, addresses: &[DeliveryAddress]) -> AppResult<()> {
        write_json(self.store.as_ref(), keys::ADDRESSES, addresses).await?;
        Ok(())
    }
}
