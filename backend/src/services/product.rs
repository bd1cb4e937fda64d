//! Product management service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use shared::models::{CreateProductInput, Product, UpdateProductInput};
use shared::validation::{validate_pricing, validate_sku};

use crate::error::{AppError, AppResult};

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Row for product queries
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    organization_id: Uuid,
    category_id: Uuid,
    name: String,
    sku: String,
    price: Decimal,
    cost_price: Decimal,
    quantity: i32,
    alert_level: i32,
    lead_time_days: i32,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_model(self) -> Product {
        Product {
            id: self.id,
            organization_id: self.organization_id,
            category_id: self.category_id,
            name: self.name,
            sku: self.sku,
            price: self.price,
            cost_price: self.cost_price,
            quantity: self.quantity,
            alert_level: self.alert_level,
            lead_time_days: self.lead_time_days,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, organization_id, category_id, name, sku, price, cost_price, \
                               quantity, alert_level, lead_time_days, deleted_at, created_at";

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product
    pub async fn create_product(
        &self,
        organization_id: Uuid,
        input: CreateProductInput,
    ) -> AppResult<Product> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        validate_sku(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;
        validate_pricing(input.price, input.cost_price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
        })?;

        // Category must belong to the same organization
        let category_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND organization_id = $2)",
        )
        .bind(input.category_id)
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        if !category_exists {
            return Err(AppError::NotFound("Category".to_string()));
        }

        let sku_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE organization_id = $1 AND sku = $2 AND deleted_at IS NULL)",
        )
        .bind(organization_id)
        .bind(&input.sku)
        .fetch_one(&self.db)
        .await?;

        if sku_taken {
            return Err(AppError::DuplicateEntry("sku".to_string()));
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (organization_id, category_id, name, sku, price, cost_price,
                                  quantity, alert_level, lead_time_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.sku)
        .bind(input.price)
        .bind(input.cost_price)
        .bind(input.quantity)
        .bind(input.alert_level)
        .bind(input.lead_time_days)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_model())
    }

    /// Get an active product by id
    pub async fn get_product(&self, organization_id: Uuid, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL
            "#
        ))
        .bind(product_id)
        .bind(organization_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into_model())
    }

    /// List active products, ordered by name
    pub async fn list_products(&self, organization_id: Uuid) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL
            ORDER BY name ASC
            "#
        ))
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_model).collect())
    }

    /// List active products at or below their alert level
    pub async fn get_low_stock_products(&self, organization_id: Uuid) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL AND quantity <= alert_level
            ORDER BY quantity ASC
            "#
        ))
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_model).collect())
    }

    /// Update a product
    ///
    /// Quantity is deliberately not updatable here; it changes only
    /// through movement application.
    pub async fn update_product(
        &self,
        organization_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let existing = self.get_product(organization_id, product_id).await?;

        let category_id = input.category_id.unwrap_or(existing.category_id);
        let name = input.name.unwrap_or(existing.name);
        let sku = input.sku.unwrap_or(existing.sku);
        let price = input.price.unwrap_or(existing.price);
        let cost_price = input.cost_price.unwrap_or(existing.cost_price);
        let alert_level = input.alert_level.unwrap_or(existing.alert_level);
        let lead_time_days = input.lead_time_days.unwrap_or(existing.lead_time_days);

        validate_sku(&sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET category_id = $1, name = $2, sku = $3, price = $4, cost_price = $5,
                alert_level = $6, lead_time_days = $7
            WHERE id = $8 AND organization_id = $9
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(category_id)
        .bind(&name)
        .bind(&sku)
        .bind(price)
        .bind(cost_price)
        .bind(alert_level)
        .bind(lead_time_days)
        .bind(product_id)
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_model())
    }

    /// Soft-delete a product; it disappears from active queries and
    /// reports but its movement history is preserved
    pub async fn delete_product(&self, organization_id: Uuid, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET deleted_at = NOW()
            WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(product_id)
        .bind(organization_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }
}
