use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict};
use uuid::Uuid;

use super::{KvStore, StoreError, StoreResult};
use crate::entity::kv_entries::{ActiveModel as KvActive, Column as KvCol, Entity as KvEntries};

/// Postgres-backed store; every owner (user) gets a separate key namespace.
#[derive(Debug, Clone)]
pub struct DbStore {
    orm: DatabaseConnection,
    owner_id: Uuid,
}

impl DbStore {
    pub fn new(orm: DatabaseConnection, owner_id: Uuid) -> Self {
        Self { orm, owner_id }
    }
}

fn backend(err: sea_orm::DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl KvStore for DbStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entry = KvEntries::find_by_id((self.owner_id, key.to_string()))
            .one(&self.orm)
            .await
            .map_err(backend)?;
        Ok(entry.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let entry = KvActive {
            owner_id: Set(self.owner_id),
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(Utc::now().into()),
        };

        KvEntries::insert(entry)
            .on_conflict(
                OnConflict::columns([KvCol::OwnerId, KvCol::Key])
                    .update_columns([KvCol::Value, KvCol::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.orm)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        KvEntries::delete_by_id((self.owner_id, key.to_string()))
            .exec(&self.orm)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
