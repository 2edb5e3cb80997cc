use std::sync::Arc;

use crate::{
    domain::profile::UserProfile,
    error::{AppError, AppResult},
    store::{KvStore, keys, read_json, write_json},
};

/// Locally cached session: the bearer token and the signed-in profile.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KvStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn sign_in(&self, token: &str, profile: &UserProfile) -> AppResult<()> {
        self.store.set(keys::USER_TOKEN, token.to_string()).await?;
        write_json(self.store.as_ref(), keys::USER_DATA, profile).await?;
        Ok(())
    }

    pub async fn token(&self) -> Option<String> {
        match self.store.get(keys::USER_TOKEN).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "session token unreadable, treating as signed out");
                None
            }
        }
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        read_json(self.store.as_ref(), keys::USER_DATA).await
    }

    pub async fn update_profile(&self, profile: UserProfile) -> AppResult<UserProfile> {
        profile.validate()?;
        if self.profile().await.is_none() {
            return Err(AppError::Unauthorized("Please sign in first".into()));
        }
        write_json(self.store.as_ref(), keys::USER_DATA, &profile).await?;
        Ok(profile)
    }

    /// Clears the cached session only; the account is untouched.
    pub async fn logout(&self) -> AppResult<()> {
        self.store.remove(keys::USER_TOKEN).await?;
        self.store.remove(keys::USER_DATA).await?;
        Ok(())
    }
}
