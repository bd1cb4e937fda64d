//! HTTP handlers for category management

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::models::{Category, CreateCategoryInput, UpdateCategoryInput};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::category::CategoryService;
use crate::AppState;

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db.clone());
    let category = service
        .create_category(current_user.0.organization_id, input)
        .await?;
    Ok(Json(category))
}

/// List categories
pub async fn list_categories(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Category>>> {
    let service = CategoryService::new(state.db.clone());
    let categories = service
        .list_categories(current_user.0.organization_id)
        .await?;
    Ok(Json(categories))
}

/// Get a category
pub async fn get_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db.clone());
    let category = service
        .get_category(current_user.0.organization_id, category_id)
        .await?;
    Ok(Json(category))
}

/// Update a category
pub async fn update_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db.clone());
    let category = service
        .update_category(current_user.0.organization_id, category_id, input)
        .await?;
    Ok(Json(category))
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CategoryService::new(state.db.clone());
    service
        .delete_category(current_user.0.organization_id, category_id)
        .await?;
    Ok(Json(()))
}
