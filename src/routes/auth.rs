use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};

use crate::{
    domain::profile::RegistrationForm,
    dto::auth::{AuthResponse, LoginRequest, OAuthTokenRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::auth_service::{exchange_oauth_token, login_user, logout, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(sign_out))
        .route("/{provider}/token", post(oauth_token))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegistrationForm,
    responses(
        (status = 200, description = "Register user", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid registration form")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationForm>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = register_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = login_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/{provider}/token",
    params(
        ("provider" = String, Path, description = "google or facebook")
    ),
    request_body = OAuthTokenRequest,
    responses(
        (status = 200, description = "Session for the provider account", body = ApiResponse<AuthResponse>),
        (status = 404, description = "Unknown provider")
    ),
    tag = "Auth"
)]
pub async fn oauth_token(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(payload): Json<OAuthTokenRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = exchange_oauth_token(&state, &provider, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Cached session cleared", body = ApiResponse<serde_json::Value>)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn sign_out(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = logout(&state, &user).await?;
    Ok(Json(resp))
}
