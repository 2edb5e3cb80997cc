//! Append-only trail of account, checkout and merchant actions.
//!
//! Rows go straight to `audit_logs` through the sqlx pool. Writing one never
//! fails the request that caused it.

use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    UserRegister,
    UserLogin,
    UserOAuthLogin,
    UserUpdate,
    CartAdd,
    CartRemove,
    FavoriteAdd,
    Checkout,
    MerchantRegister,
    ProductCreate,
    ProductUpdate,
    MerchantOrderCreate,
    MerchantOrderStatus,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserRegister => "user_register",
            Self::UserLogin => "user_login",
            Self::UserOAuthLogin => "user_oauth_login",
            Self::UserUpdate => "user_update",
            Self::CartAdd => "cart_add",
            Self::CartRemove => "cart_remove",
            Self::FavoriteAdd => "favorite_add",
            Self::Checkout => "checkout",
            Self::MerchantRegister => "merchant_register",
            Self::ProductCreate => "product_create",
            Self::ProductUpdate => "product_update",
            Self::MerchantOrderCreate => "merchant_order_create",
            Self::MerchantOrderStatus => "merchant_order_status",
        }
    }

    /// The table or keyed collection the action touched.
    pub fn resource(self) -> &'static str {
        match self {
            Self::UserRegister | Self::UserLogin | Self::UserOAuthLogin | Self::UserUpdate => {
                "users"
            }
            Self::CartAdd | Self::CartRemove => "cart",
            Self::FavoriteAdd => "favorites",
            Self::Checkout => "orders",
            Self::MerchantRegister => "merchants",
            Self::ProductCreate | Self::ProductUpdate => "merchant_products",
            Self::MerchantOrderCreate | Self::MerchantOrderStatus => "merchant_orders",
        }
    }
}

pub async fn insert(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: AuditAction,
    metadata: &Value,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action.as_str())
    .bind(action.resource())
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn record(pool: &DbPool, user_id: Option<Uuid>, action: AuditAction, metadata: Value) {
    if let Err(err) = insert(pool, user_id, action, &metadata).await {
        tracing::warn!(error = %err, action = action.as_str(), "audit log failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_actions_point_at_merchant_tables() {
        assert_eq!(AuditAction::ProductUpdate.resource(), "merchant_products");
        assert_eq!(AuditAction::MerchantOrderStatus.as_str(), "merchant_order_status");
        assert_eq!(AuditAction::Checkout.resource(), "orders");
    }
}
