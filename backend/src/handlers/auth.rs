//! Authentication handlers

use axum::{extract::State, Json};

use shared::models::UserPublic;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthResponse, AuthService, LoginInput, RefreshInput, RegisterInput};
use crate::AppState;

/// Register a new organization with its first admin user
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<Json<AuthResponse>> {
    let service = AuthService::new(state.db.clone(), state.config.jwt.clone());
    let response = service.register(input).await?;
    Ok(Json(response))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    let service = AuthService::new(state.db.clone(), state.config.jwt.clone());
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshInput>,
) -> AppResult<Json<AuthResponse>> {
    let service = AuthService::new(state.db.clone(), state.config.jwt.clone());
    let response = service.refresh(input).await?;
    Ok(Json(response))
}

/// Current user profile
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserPublic>> {
    let service = AuthService::new(state.db.clone(), state.config.jwt.clone());
    let profile = service.get_profile(current_user.0.user_id).await?;
    Ok(Json(profile))
}
