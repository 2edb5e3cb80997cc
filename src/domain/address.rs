use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{domain::DefaultEntry, error::AppError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub instructions: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Address fields as submitted by the form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    #[serde(default)]
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub instructions: Option<String>,
}

impl AddressForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [&self.street, &self.city, &self.state, &self.zip_code];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::Validation(
                "Please fill in all address fields".into(),
            ));
        }
        Ok(())
    }

    pub fn into_address(self, id: String, is_default: bool) -> DeliveryAddress {
        DeliveryAddress {
            id,
            label: self.label.trim().to_string(),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
            instructions: self
                .instructions
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
            is_default,
        }
    }
}

impl DeliveryAddress {
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }

    pub fn validate(&self) -> Result<(), AppError> {
        AddressForm {
            label: self.label.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            instructions: None,
        }
        .validate()
    }
}

impl DefaultEntry for DeliveryAddress {
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
