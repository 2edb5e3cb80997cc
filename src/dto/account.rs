use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    address::DeliveryAddress, favorite::FavoriteItem, payment::PaymentMethod,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressList {
    pub items: Vec<DeliveryAddress>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodView {
    #[serde(flatten)]
    pub method: PaymentMethod,
    pub label: String,
}

impl From<PaymentMethod> for PaymentMethodView {
    fn from(method: PaymentMethod) -> Self {
        Self {
            label: method.kind.label().to_string(),
            method,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodList {
    pub items: Vec<PaymentMethodView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteList {
    pub items: Vec<FavoriteItem>,
}
