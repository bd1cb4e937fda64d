//! Category management service

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use shared::models::{Category, CreateCategoryInput, UpdateCategoryInput};

use crate::error::{AppError, AppResult};

/// Category service
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

/// Row for category queries
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    organization_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_model(self) -> Category {
        Category {
            id: self.id,
            organization_id: self.organization_id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

impl CategoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a category
    pub async fn create_category(
        &self,
        organization_id: Uuid,
        input: CreateCategoryInput,
    ) -> AppResult<Category> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let name_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE organization_id = $1 AND name = $2)",
        )
        .bind(organization_id)
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        if name_taken {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (organization_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, organization_id, name, description, created_at
            "#,
        )
        .bind(organization_id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_model())
    }

    /// Get a category by id
    pub async fn get_category(
        &self,
        organization_id: Uuid,
        category_id: Uuid,
    ) -> AppResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, organization_id, name, description, created_at
            FROM categories
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(category_id)
        .bind(organization_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(row.into_model())
    }

    /// List an organization's categories, ordered by name
    pub async fn list_categories(&self, organization_id: Uuid) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, organization_id, name, description, created_at
            FROM categories
            WHERE organization_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_model).collect())
    }

    /// Update a category
    pub async fn update_category(
        &self,
        organization_id: Uuid,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> AppResult<Category> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let existing = self.get_category(organization_id, category_id).await?;
        let name = input.name.unwrap_or(existing.name);
        let description = input.description.or(existing.description);

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $1, description = $2
            WHERE id = $3 AND organization_id = $4
            RETURNING id, organization_id, name, description, created_at
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(category_id)
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_model())
    }

    /// Delete a category; refused while products still reference it
    pub async fn delete_category(&self, organization_id: Uuid, category_id: Uuid) -> AppResult<()> {
        let in_use = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE category_id = $1 AND deleted_at IS NULL)",
        )
        .bind(category_id)
        .fetch_one(&self.db)
        .await?;

        if in_use {
            return Err(AppError::ValidationError(
                "Category still has active products".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND organization_id = $2")
            .bind(category_id)
            .bind(organization_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }
}
