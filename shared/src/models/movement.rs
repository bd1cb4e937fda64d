//! Stock movement models
//!
//! Movements are append-only: a recorded movement is never edited or
//! deleted, a correction is a new movement of the opposite type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::MovementType;

/// A stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub product_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reason: Option<String>,
    pub note: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a movement
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovementInput {
    pub product_id: Uuid,
    pub movement_type: MovementType,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(max = 150))]
    pub reason: Option<String>,
    pub note: Option<String>,
}

/// Filter for movement queries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementFilter {
    pub product_id: Option<Uuid>,
    pub movement_type: Option<MovementType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
