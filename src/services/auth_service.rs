use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set,
    ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    domain::profile::{RegistrationForm, ensure_email},
    dto::auth::{AuthResponse, Claims, LoginRequest, OAuthTokenRequest, UpdateUserRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ROLE_CUSTOMER},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const OAUTH_PROVIDERS: [&str; 2] = ["google", "facebook"];

const TOKEN_TTL_HOURS: i64 = 24;

pub fn issue_token(secret: &str, user_id: Uuid, role: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Stores the fresh session in the user's own namespace, the way the app
/// caches `userToken`/`userData` after signing in.
async fn start_session(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let token = issue_token(&state.config.jwt_secret, user.id, &user.role)?;
    state
        .customer(user.id)
        .session
        .sign_in(&token, &user.profile())
        .await?;
    Ok(AuthResponse { token, user })
}

pub async fn register_user(
    state: &AppState,
    form: RegistrationForm,
) -> AppResult<ApiResponse<AuthResponse>> {
    form.validate()?;
    let email = form.email.trim().to_lowercase();

    let exists = Users::find()
        .filter(
            Condition::all()
                .add(UserCol::Email.eq(email.as_str()))
                .add(UserCol::PasswordHash.is_not_null()),
        )
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::Validation("Email is already taken".into()));
    }

    let phone = Some(form.phone.trim().to_string()).filter(|phone| !phone.is_empty());
    let user: User = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        name: Set(form.name.trim().to_string()),
        phone: Set(phone),
        address: Set(None),
        picture: Set(None),
        password_hash: Set(Some(hash_password(&form.password)?)),
        provider: Set(None),
        provider_id: Set(None),
        role: Set(ROLE_CUSTOMER.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?
    .into();

    audit::record(
        &state.pool,
        Some(user.id),
        AuditAction::UserRegister,
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    let resp = start_session(state, user).await?;
    Ok(ApiResponse::success("User created", resp, None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let LoginRequest { email, password } = payload;
    let invalid = || AppError::Unauthorized("Invalid email or password".into());

    let model = Users::find()
        .filter(
            Condition::all()
                .add(UserCol::Email.eq(email.trim().to_lowercase()))
                .add(UserCol::PasswordHash.is_not_null()),
        )
        .one(&state.orm)
        .await?
        .ok_or_else(invalid)?;

    let stored = model.password_hash.clone().ok_or_else(invalid)?;
    let parsed_hash = PasswordHash::new(&stored)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid());
    }

    let user: User = model.into();
    audit::record(
        &state.pool,
        Some(user.id),
        AuditAction::UserLogin,
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    let resp = start_session(state, user).await?;
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

/// Exchanges a provider sign-in for a session. The provider access token is
/// trusted as given.
pub async fn exchange_oauth_token(
    state: &AppState,
    provider: &str,
    payload: OAuthTokenRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    if !OAUTH_PROVIDERS.contains(&provider) {
        return Err(AppError::not_found("Provider"));
    }
    if payload.access_token.trim().is_empty() {
        return Err(AppError::Validation("Missing access token".into()));
    }
    let profile = payload.profile;
    ensure_email(&profile.email)?;

    let existing = Users::find()
        .filter(
            Condition::all()
                .add(UserCol::Provider.eq(provider))
                .add(UserCol::ProviderId.eq(profile.id.as_str())),
        )
        .one(&state.orm)
        .await?;

    let user: User = match existing {
        Some(model) => {
            let mut active: UserActive = model.into();
            if profile.picture.is_some() {
                active.picture = Set(profile.picture.clone());
            }
            active.update(&state.orm).await?.into()
        }
        None => {
            let user: User = UserActive {
                id: Set(Uuid::new_v4()),
                email: Set(profile.email.trim().to_lowercase()),
                name: Set(profile.name.trim().to_string()),
                phone: Set(None),
                address: Set(None),
                picture: Set(profile.picture.clone()),
                password_hash: Set(None),
                provider: Set(Some(provider.to_string())),
                provider_id: Set(Some(profile.id.clone())),
                role: Set(ROLE_CUSTOMER.to_string()),
                created_at: NotSet,
            }
            .insert(&state.orm)
            .await?
            .into();
            tracing::info!(user_id = %user.id, provider, "user created from provider sign-in");
            user
        }
    };

    audit::record(
        &state.pool,
        Some(user.id),
        AuditAction::UserOAuthLogin,
        serde_json::json!({ "user_id": user.id, "provider": provider }),
    )
    .await;

    let resp = start_session(state, user).await?;
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn current_user(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(auth.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(ApiResponse::ok(user.into()))
}

pub async fn update_current_user(
    state: &AppState,
    auth: &AuthUser,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Please enter your name".into()));
    }
    ensure_email(&payload.email)?;

    let model = Users::find_by_id(auth.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let mut active: UserActive = model.into();
    active.name = Set(payload.name.trim().to_string());
    active.email = Set(payload.email.trim().to_lowercase());
    active.phone = Set(payload.phone);
    active.address = Set(payload.address);
    active.picture = Set(payload.picture);
    let user: User = active.update(&state.orm).await?.into();

    // Keep the cached profile in step; a stale cache is not worth failing over.
    if let Err(err) = state
        .customer(user.id)
        .session
        .update_profile(user.profile())
        .await
    {
        tracing::warn!(user_id = %user.id, error = %err, "session profile not refreshed");
    }

    audit::record(
        &state.pool,
        Some(user.id),
        AuditAction::UserUpdate,
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("Profile updated", user, Some(Meta::empty())))
}

pub async fn logout(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<serde_json::Value>> {
    state.customer(auth.user_id).session.logout().await?;
    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
