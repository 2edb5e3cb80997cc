use food_delivery_api::{
    config::{AppConfig, CheckoutConfig},
    db::{create_orm_conn, create_pool, run_migrations},
    domain::{
        catalog::Catalog, merchant_order::MerchantOrderStatus, order::OrderType,
        profile::RegistrationForm, report::Timeframe,
    },
    dto::{
        auth::{LoginRequest, OAuthProfile, OAuthTokenRequest},
        merchant::{
            CreateMerchantOrderRequest, CreateProductRequest, OrderLineRequest,
            RegisterMerchantRequest, ReportQuery, UpdateOrderStatusRequest,
        },
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::{AuthUser, ROLE_CUSTOMER, ROLE_MERCHANT},
    money::Money,
    services::{auth_service, merchant_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use uuid::Uuid;

// Customer orders from a merchant; merchant accepts, fulfils, and reads the report.
#[tokio::test]
async fn merchant_order_lifecycle_and_report() -> anyhow::Result<()> {
    let Some(database_url) = database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run merchant flow tests.");
        return Ok(());
    };

    let state = setup_state(&database_url).await?;
    let customer = create_user(&state, ROLE_CUSTOMER).await?;
    let owner = create_user(&state, ROLE_CUSTOMER).await?;

    merchant_service::register_merchant(
        &state,
        &owner,
        RegisterMerchantRequest {
            business_name: "Aling Nena's Carinderia".into(),
            business_type: "Carinderia".into(),
            address: "Sampaloc, Manila".into(),
            phone: "09181112222".into(),
            logo: None,
        },
    )
    .await?;
    let merchant = AuthUser {
        user_id: owner.user_id,
        role: ROLE_MERCHANT.into(),
    };

    let adobo = merchant_service::create_product(
        &state,
        &merchant,
        CreateProductRequest {
            name: "Chicken Adobo".into(),
            description: Some("With rice".into()),
            price: Money::from_pesos(95),
            category: Some("Rice Meals".into()),
            image: None,
            is_available: true,
        },
    )
    .await?
    .data
    .expect("product");

    let overpriced = merchant_service::create_product(
        &state,
        &merchant,
        CreateProductRequest {
            name: "Gold Adobo".into(),
            description: None,
            price: Money::from_centavos(90_000_000_000_000_000),
            category: None,
            image: None,
            is_available: true,
        },
    )
    .await;
    assert!(matches!(overpriced, Err(AppError::Validation(_))));

    // Customers cannot add products.
    let denied = merchant_service::create_product(
        &state,
        &customer,
        CreateProductRequest {
            name: "Fake".into(),
            description: None,
            price: Money::from_pesos(1),
            category: None,
            image: None,
            is_available: true,
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let order = merchant_service::create_order(
        &state,
        &customer,
        CreateMerchantOrderRequest {
            merchant_id: merchant.user_id,
            order_number: Some("UFF-1-abcdef12".into()),
            order_type: OrderType::Pickup,
            delivery_address: None,
            items: vec![OrderLineRequest {
                product_id: adobo.id,
                quantity: 2,
            }],
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(order.order.status, MerchantOrderStatus::Pending);
    assert_eq!(order.order.total_amount, Money::from_pesos(190));

    // Skipping straight to ready is not allowed.
    let skipped = merchant_service::update_order_status(
        &state,
        &merchant,
        order.order.id,
        UpdateOrderStatusRequest {
            status: "ready".into(),
        },
    )
    .await;
    assert!(matches!(skipped, Err(AppError::InvalidState(_))));

    for status in ["preparing", "ready", "delivered"] {
        let updated = merchant_service::update_order_status(
            &state,
            &merchant,
            order.order.id,
            UpdateOrderStatusRequest {
                status: status.into(),
            },
        )
        .await?
        .data
        .expect("updated order");
        assert_eq!(updated.order.status.as_str(), status);
    }

    let cancel = merchant_service::cancel_order(&state, &merchant, order.order.id).await;
    assert!(matches!(cancel, Err(AppError::InvalidState(_))));

    let report = merchant_service::sales_reports(
        &state,
        &merchant,
        merchant.user_id,
        ReportQuery {
            timeframe: Timeframe::Daily,
        },
    )
    .await?
    .data
    .expect("report");
    assert_eq!(report.reports.len(), 1);
    assert_eq!(report.reports[0].total_sales, Money::from_pesos(190));
    assert_eq!(report.reports[0].top_items[0].name, "Chicken Adobo");

    let other_merchant = merchant_service::list_orders(&state, &customer, merchant.user_id, None).await;
    assert!(matches!(other_merchant, Err(AppError::Forbidden)));

    Ok(())
}

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}

#[tokio::test]
async fn password_and_provider_sign_in_start_a_session() -> anyhow::Result<()> {
    let Some(database_url) = database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run auth flow tests.");
        return Ok(());
    };
    let state = setup_state(&database_url).await?;
    let email = format!("{}@example.com", Uuid::new_v4());

    let mismatch = auth_service::register_user(
        &state,
        RegistrationForm {
            name: "Juan".into(),
            email: email.clone(),
            phone: String::new(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        },
    )
    .await;
    assert!(matches!(mismatch, Err(AppError::Validation(_))));

    let registered = auth_service::register_user(
        &state,
        RegistrationForm {
            name: "Juan".into(),
            email: email.to_uppercase(),
            phone: "09171234567".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        },
    )
    .await?
    .data
    .expect("auth response");
    assert_eq!(registered.user.email, email);
    assert_eq!(registered.user.role, ROLE_CUSTOMER);

    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            email: email.clone(),
            password: "nope".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    let logged_in = auth_service::login_user(
        &state,
        LoginRequest {
            email: email.clone(),
            password: "secret1".into(),
        },
    )
    .await?
    .data
    .expect("auth response");
    let session = state.customer(logged_in.user.id).session;
    assert_eq!(session.token().await, Some(logged_in.token.clone()));

    let user = AuthUser {
        user_id: logged_in.user.id,
        role: ROLE_CUSTOMER.into(),
    };
    auth_service::logout(&state, &user).await?;
    assert_eq!(session.token().await, None);

    // The same provider account signs in to the same user twice.
    let provider_id = Uuid::new_v4().to_string();
    let oauth = |picture: Option<&str>| OAuthTokenRequest {
        access_token: "provider-access-token".into(),
        profile: OAuthProfile {
            id: provider_id.clone(),
            email: format!("{provider_id}@gmail.com"),
            name: "Maria".into(),
            picture: picture.map(str::to_string),
        },
    };
    let first = auth_service::exchange_oauth_token(&state, "google", oauth(None))
        .await?
        .data
        .expect("auth response");
    let second = auth_service::exchange_oauth_token(&state, "google", oauth(Some("https://pics/m.png")))
        .await?
        .data
        .expect("auth response");
    assert_eq!(first.user.id, second.user.id);
    assert_eq!(second.user.picture.as_deref(), Some("https://pics/m.png"));

    let unknown = auth_service::exchange_oauth_token(&state, "myspace", oauth(None)).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        checkout: CheckoutConfig::default(),
        catalog_path: None,
    };
    Ok(AppState::new(pool, orm, config, Catalog::builtin()))
}

async fn create_user(state: &AppState, role: &str) -> anyhow::Result<AuthUser> {
    let id = Uuid::new_v4();
    UserActive {
        id: Set(id),
        email: Set(format!("{id}@example.com")),
        name: Set("Test User".into()),
        phone: Set(None),
        address: Set(None),
        picture: Set(None),
        password_hash: Set(None),
        provider: Set(None),
        provider_id: Set(None),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: id,
        role: role.into(),
    })
}
