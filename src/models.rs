//! Server-side records as the API returns them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{merchant_order::MerchantOrderStatus, order::OrderType, profile::UserProfile},
    entity::{merchant_order_items, merchant_orders, merchant_products, merchants, users},
    error::AppError,
    money::Money,
};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub picture: Option<String>,
    pub provider: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            phone: model.phone,
            address: model.address,
            picture: model.picture,
            provider: model.provider,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl User {
    /// The profile cached in the customer's session.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            avatar: self.picture.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Merchant {
    pub user_id: Uuid,
    pub business_name: String,
    pub business_type: String,
    pub address: String,
    pub phone: String,
    pub logo: Option<String>,
    pub is_verified: bool,
}

impl From<merchants::Model> for Merchant {
    fn from(model: merchants::Model) -> Self {
        Self {
            user_id: model.user_id,
            business_name: model.business_name,
            business_type: model.business_type,
            address: model.address,
            phone: model.phone,
            logo: model.logo,
            is_verified: model.is_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MerchantProduct {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub category: Option<String>,
    pub image: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<merchant_products::Model> for MerchantProduct {
    fn from(model: merchant_products::Model) -> Self {
        Self {
            id: model.id,
            merchant_id: model.merchant_id,
            name: model.name,
            description: model.description,
            price: Money::from_centavos(model.price),
            category: model.category,
            image: model.image,
            is_available: model.is_available,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MerchantOrder {
    pub id: Uuid,
    pub order_number: Option<String>,
    pub customer_id: Uuid,
    pub merchant_id: Uuid,
    pub status: MerchantOrderStatus,
    pub order_type: OrderType,
    pub total_amount: Money,
    pub delivery_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<merchant_orders::Model> for MerchantOrder {
    type Error = AppError;

    fn try_from(model: merchant_orders::Model) -> Result<Self, Self::Error> {
        let order_type = match model.order_type.as_str() {
            "pickup" => OrderType::Pickup,
            _ => OrderType::Delivery,
        };
        Ok(Self {
            id: model.id,
            order_number: model.order_number,
            customer_id: model.customer_id,
            merchant_id: model.merchant_id,
            status: model.status.parse()?,
            order_type,
            total_amount: Money::from_centavos(model.total_amount),
            delivery_address: model.delivery_address,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MerchantOrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: Money,
}

impl From<merchant_order_items::Model> for MerchantOrderItem {
    fn from(model: merchant_order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            name: model.name,
            quantity: model.quantity,
            price: Money::from_centavos(model.price),
        }
    }
}
