//! Organization profile service
//!
//! Read and update the calling user's own organization. The slug is fixed
//! at registration and never changes afterwards.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::{Organization, UpdateOrganizationInput};

use crate::error::{AppError, AppResult};

/// Organization profile service
#[derive(Clone)]
pub struct OrganizationService {
    db: PgPool,
}

/// Row for organization queries
#[derive(Debug, sqlx::FromRow)]
struct OrganizationRow {
    id: Uuid,
    name: String,
    slug: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl OrganizationRow {
    fn into_model(self) -> Organization {
        Organization {
            id: self.id,
            name: self.name,
            slug: self.slug,
            active: self.active,
            created_at: self.created_at,
        }
    }
}

const ORGANIZATION_COLUMNS: &str = "id, name, slug, active, created_at";

impl OrganizationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get an organization by id
    pub async fn get_organization(&self, organization_id: Uuid) -> AppResult<Organization> {
        let row = sqlx::query_as::<_, OrganizationRow>(&format!(
            "SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE id = $1"
        ))
        .bind(organization_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization".to_string()))?;

        Ok(row.into_model())
    }

    /// Update an organization's profile
    pub async fn update_organization(
        &self,
        organization_id: Uuid,
        input: UpdateOrganizationInput,
    ) -> AppResult<Organization> {
        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation {
                    field: "name".to_string(),
                    message: "Organization name must not be empty".to_string(),
                });
            }
        }

        let existing = self.get_organization(organization_id).await?;
        let name = input.name.unwrap_or(existing.name);
        let active = input.active.unwrap_or(existing.active);

        let row = sqlx::query_as::<_, OrganizationRow>(&format!(
            r#"
            UPDATE organizations
            SET name = $1, active = $2
            WHERE id = $3
            RETURNING {ORGANIZATION_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(active)
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_model())
    }
}
