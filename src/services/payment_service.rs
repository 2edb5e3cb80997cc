use std::sync::Arc;

use crate::{
    domain::{
        default_entry, make_default,
        payment::{PaymentMethod, seed_payment_methods},
        remove_entry,
    },
    error::{AppError, AppResult},
    store::{KvStore, keys, read_list, write_json},
};

#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn KvStore>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Seeds the default set on first access. A failed seed write is logged;
    /// the seeds are still returned.
    pub async fn list(&self) -> Vec<PaymentMethod> {
        let methods: Vec<PaymentMethod> = read_list(self.store.as_ref(), keys::PAYMENT_METHODS).await;
        if !methods.is_empty() {
            return methods;
        }

        let seeded = seed_payment_methods();
        if let Err(err) = write_json(self.store.as_ref(), keys::PAYMENT_METHODS, &seeded).await {
            tracing::warn!(error = %err, "could not persist seeded payment methods");
        }
        seeded
    }

    pub async fn find(&self, id: &str) -> AppResult<PaymentMethod> {
        self.list()
            .await
            .into_iter()
            .find(|method| method.id == id)
            .ok_or_else(|| AppError::not_found("Payment method"))
    }

    pub async fn default_method(&self) -> Option<PaymentMethod> {
        default_entry(&self.list().await).cloned()
    }

    pub async fn set_default(&self, id: &str) -> AppResult<PaymentMethod> {
        let mut methods = self.list().await;
        if !make_default(&mut methods, id) {
            return Err(AppError::not_found("Payment method"));
        }
        write_json(self.store.as_ref(), keys::PAYMENT_METHODS, &methods).await?;
        methods
            .into_iter()
            .find(|method| method.id == id)
            .ok_or_else(|| AppError::not_found("Payment method"))
    }

    pub async fn remove(&self, id: &str) -> AppResult<PaymentMethod> {
        let mut methods = self.list().await;
        let removed =
            remove_entry(&mut methods, id).ok_or_else(|| AppError::not_found("Payment method"))?;
        write_json(self.store.as_ref(), keys::PAYMENT_METHODS, &methods).await?;
        Ok(removed)
    }
}
