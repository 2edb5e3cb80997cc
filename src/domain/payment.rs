use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DefaultEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Cash,
    Card,
    Gcash,
    Maya,
}

impl PaymentType {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash on Delivery",
            PaymentType::Card => "Credit/Debit Card",
            PaymentType::Gcash => "GCash",
            PaymentType::Maya => "Maya",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PaymentType,
    #[serde(default)]
    pub is_default: bool,
}

/// Methods seeded the first time the list is read. Cash is the default.
pub fn seed_payment_methods() -> Vec<PaymentMethod> {
    [
        ("cash-1", PaymentType::Cash, true),
        ("card-1", PaymentType::Card, false),
        ("gcash-1", PaymentType::Gcash, false),
        ("maya-1", PaymentType::Maya, false),
    ]
    .into_iter()
    .map(|(id, kind, is_default)| PaymentMethod {
        id: id.to_string(),
        kind,
        is_default,
    })
    .collect()
}

impl DefaultEntry for PaymentMethod {
    fn entry_id(&self) -> &str {
        &self.id
    }

    fn is_default(&self) -> bool {
        self.is_default
    }

    fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }
}
