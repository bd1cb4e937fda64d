//! HTTP handlers for user management (admin-only)

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::models::{CreateUserInput, UpdateUserInput, User};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::user::UserService;
use crate::AppState;

/// Create a user in the caller's organization
pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateUserInput>,
) -> AppResult<Json<User>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db.clone());
    let user = service
        .create_user(current_user.0.organization_id, input)
        .await?;
    Ok(Json(user))
}

/// List the caller's organization users
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db.clone());
    let users = service.list_users(current_user.0.organization_id).await?;
    Ok(Json(users))
}

/// Get a user
pub async fn get_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db.clone());
    let user = service
        .get_user(current_user.0.organization_id, user_id)
        .await?;
    Ok(Json(user))
}

/// Update a user
pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<User>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db.clone());
    let user = service
        .update_user(current_user.0.organization_id, user_id, input)
        .await?;
    Ok(Json(user))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db.clone());
    service
        .delete_user(current_user.0.organization_id, user_id)
        .await?;
    Ok(Json(()))
}
