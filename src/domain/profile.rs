use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "profileImage")]
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Please enter your name".into()));
        }
        ensure_email(&self.email)
    }
}

/// `local@domain.tld` with no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn ensure_email(email: &str) -> Result<(), AppError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Please enter a valid email address".into(),
        ))
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [&self.name, &self.email, &self.password, &self.confirm_password];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::Validation("Please fill in all fields".into()));
        }
        if self.password != self.confirm_password {
            return Err(AppError::Validation("Passwords do not match".into()));
        }
        ensure_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str, email: &str) -> RegistrationForm {
        RegistrationForm {
            name: "Juan".into(),
            email: email.into(),
            phone: String::new(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("juan@example.ph"));
        assert!(!is_valid_email("juan@example"));
        assert!(!is_valid_email("juan example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn registration_rules() {
        assert!(form("secret1", "secret1", "juan@example.ph").validate().is_ok());
        assert!(form("secret1", "secret2", "juan@example.ph").validate().is_err());
        assert!(form("abc", "abc", "juan@example.ph").validate().is_err());
        assert!(form("secret1", "secret1", "juan").validate().is_err());
    }
}
