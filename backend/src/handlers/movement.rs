//! HTTP handlers for stock movements

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{CreateMovementInput, Movement, MovementFilter};
use shared::types::MovementType;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::movement::MovementService;
use crate::services::reports::window;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MovementListQuery {
    pub product_id: Option<Uuid>,
    pub movement_type: Option<MovementType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Record a movement
pub async fn create_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateMovementInput>,
) -> AppResult<Json<Movement>> {
    let service = MovementService::new(state.db.clone());
    let movement = service
        .create_movement(
            current_user.0.organization_id,
            current_user.0.user_id,
            input,
        )
        .await?;
    Ok(Json(movement))
}

/// List movements, newest first
pub async fn list_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<MovementListQuery>,
) -> AppResult<Json<Vec<Movement>>> {
    let filter = MovementFilter {
        product_id: query.product_id,
        movement_type: query.movement_type,
        start_date: query.start_date.as_deref().and_then(window::parse_instant),
        end_date: query.end_date.as_deref().and_then(window::parse_instant),
    };
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let offset = query.offset.unwrap_or(0).max(0);

    let service = MovementService::new(state.db.clone());
    let movements = service
        .filter_movements(current_user.0.organization_id, &filter, limit, offset)
        .await?;
    Ok(Json(movements))
}
