mod common;

use food_delivery_api::{
    domain::{
        address::AddressForm,
        favorite::FavoriteItem,
        payment::PaymentType,
        profile::{RegistrationForm, UserProfile},
    },
    error::AppError,
    money::Money,
};

use common::customer;

fn address(street: &str) -> AddressForm {
    AddressForm {
        label: "Home".into(),
        street: street.into(),
        city: "Quezon City".into(),
        state: "Metro Manila".into(),
        zip_code: "1100".into(),
        instructions: None,
    }
}

#[tokio::test]
async fn first_address_is_default_and_only_one_stays_default() -> anyhow::Result<()> {
    let customer = customer();
    let first = customer.addresses.add(address("1 Katipunan Ave")).await?;
    let second = customer.addresses.add(address("2 Maginhawa St")).await?;
    assert!(first.is_default);
    assert!(!second.is_default);

    customer.addresses.set_default(&second.id).await?;

    let addresses = customer.addresses.list().await;
    assert_eq!(addresses.iter().filter(|a| a.is_default).count(), 1);
    assert_eq!(
        customer.addresses.default_address().await.map(|a| a.id),
        Some(second.id)
    );
    Ok(())
}

#[tokio::test]
async fn deleting_default_address_promotes_first_remaining() -> anyhow::Result<()> {
    let customer = customer();
    let first = customer.addresses.add(address("1 Katipunan Ave")).await?;
    let second = customer.addresses.add(address("2 Maginhawa St")).await?;

    customer.addresses.delete(&first.id).await?;

    let remaining = customer.addresses.list().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert!(remaining[0].is_default);
    Ok(())
}

#[tokio::test]
async fn incomplete_address_is_rejected() -> anyhow::Result<()> {
    let customer = customer();
    let result = customer.addresses.add(address("   ")).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(customer.addresses.list().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_keeps_id_and_default_flag() -> anyhow::Result<()> {
    let customer = customer();
    let original = customer.addresses.add(address("1 Katipunan Ave")).await?;

    let updated = customer
        .addresses
        .update(&original.id, address("99 Aurora Blvd"))
        .await?;

    assert_eq!(updated.id, original.id);
    assert!(updated.is_default);
    assert_eq!(updated.street, "99 Aurora Blvd");
    Ok(())
}

#[tokio::test]
async fn payment_methods_are_seeded_with_cash_default() -> anyhow::Result<()> {
    let customer = customer();

    let methods = customer.payments.list().await;
    let ids: Vec<&str> = methods.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["cash-1", "card-1", "gcash-1", "maya-1"]);

    let default = customer.payments.default_method().await.expect("default");
    assert_eq!(default.kind, PaymentType::Cash);
    assert_eq!(default.kind.label(), "Cash on Delivery");

    customer.payments.set_default("maya-1").await?;
    let methods = customer.payments.list().await;
    assert_eq!(methods.iter().filter(|m| m.is_default).count(), 1);

    customer.payments.remove("maya-1").await?;
    let default = customer.payments.default_method().await.expect("promoted");
    assert_eq!(default.id, "cash-1");
    Ok(())
}

#[tokio::test]
async fn favorites_dedupe_and_merge_into_cart() -> anyhow::Result<()> {
    let customer = customer();
    let favorite = FavoriteItem {
        id: "greenwich-lasagna-supreme".into(),
        name: "Lasagna Supreme".into(),
        price: Money::from_pesos(129),
        restaurant: "Greenwich".into(),
        description: None,
    };

    customer.favorites.add(favorite.clone()).await?;
    customer.favorites.add(favorite.clone()).await?;
    assert_eq!(customer.favorites.list().await.len(), 1);
    assert!(customer.favorites.is_favorite(&favorite.id).await);

    customer.favorites.add_to_cart(&favorite.id).await?;
    let line = customer.favorites.add_to_cart(&favorite.id).await?;
    assert_eq!(line.quantity, 2);
    assert_eq!(customer.cart.items().await.len(), 1);

    customer.favorites.remove(&favorite.id).await?;
    assert!(matches!(
        customer.favorites.remove(&favorite.id).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn session_sign_in_update_and_logout() -> anyhow::Result<()> {
    let customer = customer();
    let profile = UserProfile {
        id: "u-1".into(),
        name: "Maria Clara".into(),
        email: "maria@example.com".into(),
        phone: "09171234567".into(),
        address: String::new(),
        avatar: None,
    };

    customer.session.sign_in("token-123", &profile).await?;
    assert_eq!(customer.session.token().await.as_deref(), Some("token-123"));
    assert_eq!(customer.session.profile().await, Some(profile.clone()));

    let bad = customer
        .session
        .update_profile(UserProfile {
            email: "not-an-email".into(),
            ..profile.clone()
        })
        .await;
    assert!(matches!(bad, Err(AppError::Validation(_))));

    customer.session.logout().await?;
    assert!(customer.session.token().await.is_none());
    assert!(customer.session.profile().await.is_none());
    Ok(())
}

#[test]
fn registration_requires_matching_passwords_and_valid_email() {
    let form = |password: &str, confirm: &str, email: &str| RegistrationForm {
        name: "Jose Rizal".into(),
        email: email.into(),
        phone: String::new(),
        password: password.into(),
        confirm_password: confirm.into(),
    };

    assert!(form("secret1", "secret1", "jose@example.com").validate().is_ok());
    assert!(form("secret1", "secret2", "jose@example.com").validate().is_err());
    assert!(form("secret1", "secret1", "jose@example").validate().is_err());
    assert!(form("abc", "abc", "jose@example.com").validate().is_err());
}
