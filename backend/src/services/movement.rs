//! Stock movement service
//!
//! Movements are the append-only ledger behind every report: an entry
//! increases a product's quantity, an exit decreases it, and the stored
//! quantity is always the running sum of applied movements.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use shared::models::{CreateMovementInput, Movement, MovementFilter};
use shared::types::MovementType;

use crate::error::{AppError, AppResult};

/// Movement service
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

/// Row for movement queries
#[derive(Debug, sqlx::FromRow)]
struct MovementRow {
    id: Uuid,
    organization_id: Uuid,
    product_id: Uuid,
    movement_type: String,
    quantity: i32,
    reason: Option<String>,
    note: Option<String>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl MovementRow {
    fn into_model(self) -> Movement {
        let movement_type = if self.movement_type == "entry" {
            MovementType::Entry
        } else {
            MovementType::Exit
        };
        Movement {
            id: self.id,
            organization_id: self.organization_id,
            product_id: self.product_id,
            movement_type,
            quantity: self.quantity,
            reason: self.reason,
            note: self.note,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

impl MovementService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a movement and adjust product stock in one transaction
    ///
    /// The product row is locked for the duration so concurrent exits
    /// cannot drive the quantity negative.
    pub async fn create_movement(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        input: CreateMovementInput,
    ) -> AppResult<Movement> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let mut tx = self.db.begin().await?;

        let quantity = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT quantity FROM products
            WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(input.product_id)
        .bind(organization_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let new_quantity = match input.movement_type {
            MovementType::Entry => quantity + input.quantity,
            MovementType::Exit => {
                if quantity < input.quantity {
                    return Err(AppError::InsufficientStock(format!(
                        "Requested {} units but only {} in stock",
                        input.quantity, quantity
                    )));
                }
                quantity - input.quantity
            }
        };

        sqlx::query("UPDATE products SET quantity = $1 WHERE id = $2")
            .bind(new_quantity)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, MovementRow>(
            r#"
            INSERT INTO movements (organization_id, product_id, movement_type, quantity, reason, note, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, organization_id, product_id, movement_type, quantity, reason, note,
                      created_by, created_at
            "#,
        )
        .bind(organization_id)
        .bind(input.product_id)
        .bind(input.movement_type.as_str())
        .bind(input.quantity)
        .bind(&input.reason)
        .bind(&input.note)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_model())
    }

    /// List movements matching a filter, newest first
    pub async fn filter_movements(
        &self,
        organization_id: Uuid,
        filter: &MovementFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Movement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, organization_id, product_id, movement_type, quantity, reason, note,
                   created_by, created_at
            FROM movements
            WHERE organization_id = $1
              AND ($2::uuid IS NULL OR product_id = $2)
              AND ($3::text IS NULL OR movement_type = $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(organization_id)
        .bind(filter.product_id)
        .bind(filter.movement_type.map(|t| t.as_str()))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(MovementRow::into_model).collect())
    }

    /// List all movements for a product, newest first
    pub async fn get_product_movements(
        &self,
        organization_id: Uuid,
        product_id: Uuid,
    ) -> AppResult<Vec<Movement>> {
        let filter = MovementFilter {
            product_id: Some(product_id),
            ..Default::default()
        };
        self.filter_movements(organization_id, &filter, 500, 0).await
    }
}
