use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use food_delivery_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    domain::catalog::Catalog,
    middleware::auth::{ROLE_CUSTOMER, ROLE_MERCHANT},
};
use uuid::Uuid;

const MERCHANT_SHOP: &str = "jollibee";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let customer_id = ensure_user(
        &pool,
        "Juan Dela Cruz",
        "customer@example.com",
        "customer123",
        ROLE_CUSTOMER,
    )
    .await?;
    let merchant_id = ensure_user(
        &pool,
        "Jollibee Manager",
        "merchant@example.com",
        "merchant123",
        ROLE_MERCHANT,
    )
    .await?;
    ensure_merchant(&pool, merchant_id).await?;
    seed_products(&pool, merchant_id).await?;

    println!("Seed completed. Customer ID: {customer_id}, Merchant ID: {merchant_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) WHERE password_hash IS NOT NULL
        DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_merchant(pool: &sqlx::PgPool, user_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO merchants (user_id, business_name, business_type, address, phone, is_verified)
        VALUES ($1, $2, $3, $4, $5, TRUE)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind("Jollibee - Ayala Triangle")
    .bind("Fast Food")
    .bind("Ayala Triangle Gardens, Makati City")
    .bind("+63 2 8888 0000")
    .execute(pool)
    .await?;
    Ok(())
}

/// Mirrors the built-in Jollibee menu so merchant orders line up with what
/// customers browse.
async fn seed_products(pool: &sqlx::PgPool, merchant_id: Uuid) -> anyhow::Result<()> {
    let (existing,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM merchant_products WHERE merchant_id = $1")
            .bind(merchant_id)
            .fetch_one(pool)
            .await?;
    if existing > 0 {
        println!("Products already present for merchant, skipping");
        return Ok(());
    }

    let catalog = Catalog::builtin();
    let shop = catalog
        .shop(MERCHANT_SHOP)
        .ok_or_else(|| anyhow::anyhow!("built-in catalog has no {MERCHANT_SHOP} shop"))?;

    for item in &shop.menu {
        sqlx::query(
            r#"
            INSERT INTO merchant_products (id, merchant_id, name, description, price, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(merchant_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price.centavos())
        .bind(shop.categories.first().cloned())
        .execute(pool)
        .await?;
    }

    println!("Seeded {} products for {}", shop.menu.len(), shop.name);
    Ok(())
}
