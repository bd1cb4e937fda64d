//! HTTP handlers for product management

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::models::{CreateProductInput, Movement, Product, UpdateProductInput};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::movement::MovementService;
use crate::services::product::ProductService;
use crate::AppState;

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db.clone());
    let product = service
        .create_product(current_user.0.organization_id, input)
        .await?;
    Ok(Json(product))
}

/// List active products
pub async fn list_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db.clone());
    let products = service.list_products(current_user.0.organization_id).await?;
    Ok(Json(products))
}

/// List products at or below their alert level
pub async fn get_low_stock_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db.clone());
    let products = service
        .get_low_stock_products(current_user.0.organization_id)
        .await?;
    Ok(Json(products))
}

/// Get a product
pub async fn get_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db.clone());
    let product = service
        .get_product(current_user.0.organization_id, product_id)
        .await?;
    Ok(Json(product))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db.clone());
    let product = service
        .update_product(current_user.0.organization_id, product_id, input)
        .await?;
    Ok(Json(product))
}

/// Soft-delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ProductService::new(state.db.clone());
    service
        .delete_product(current_user.0.organization_id, product_id)
        .await?;
    Ok(Json(()))
}

/// Movement history for a product
pub async fn get_product_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<Movement>>> {
    let service = MovementService::new(state.db.clone());
    let movements = service
        .get_product_movements(current_user.0.organization_id, product_id)
        .await?;
    Ok(Json(movements))
}
