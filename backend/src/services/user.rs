//! User management service
//!
//! Admin-only account administration inside one organization. Accounts are
//! always created in the caller's organization; there is no cross-tenant
//! user management.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use shared::models::{CreateUserInput, UpdateUserInput, User};
use shared::types::Role;

use crate::error::{AppError, AppResult};

/// User management service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Row for user queries
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    organization_id: Uuid,
    email: String,
    full_name: Option<String>,
    role: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_model(self) -> AppResult<User> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|_| AppError::Internal(format!("Unknown role in database: {}", self.role)))?;
        Ok(User {
            id: self.id,
            organization_id: self.organization_id,
            email: self.email,
            full_name: self.full_name,
            role,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

const USER_COLUMNS: &str = "id, organization_id, email, full_name, role, active, created_at";

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a user in the given organization
    pub async fn create_user(&self, organization_id: Uuid, input: CreateUserInput) -> AppResult<User> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&input.email)
                .fetch_one(&self.db)
                .await?;

        if email_taken {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (organization_id, email, full_name, role, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(&input.email)
        .bind(&input.full_name)
        .bind(input.role.as_str())
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await?;

        let user = row.into_model()?;
        tracing::info!(organization_id = %organization_id, email = %user.email, role = %user.role.as_str(), "user created");

        Ok(user)
    }

    /// List an organization's users, newest first
    pub async fn list_users(&self, organization_id: Uuid) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE organization_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(UserRow::into_model).collect()
    }

    /// Get a user by id
    pub async fn get_user(&self, organization_id: Uuid, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND organization_id = $2"
        ))
        .bind(user_id)
        .bind(organization_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        row.into_model()
    }

    /// Update a user; a new password is re-hashed before storage
    pub async fn update_user(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> AppResult<User> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let existing = self.get_user(organization_id, user_id).await?;

        if let Some(email) = &input.email {
            if email != &existing.email {
                let email_taken = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
                )
                .bind(email)
                .bind(user_id)
                .fetch_one(&self.db)
                .await?;

                if email_taken {
                    return Err(AppError::DuplicateEntry("email".to_string()));
                }
            }
        }

        let password_hash = match &input.password {
            Some(password) => Some(
                bcrypt::hash(password, bcrypt::DEFAULT_COST)
                    .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?,
            ),
            None => None,
        };

        let email = input.email.unwrap_or(existing.email);
        let full_name = input.full_name.or(existing.full_name);
        let role = input.role.unwrap_or(existing.role);
        let active = input.active.unwrap_or(existing.active);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET email = $1,
                full_name = $2,
                role = $3,
                active = $4,
                password_hash = COALESCE($5, password_hash)
            WHERE id = $6 AND organization_id = $7
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&email)
        .bind(&full_name)
        .bind(role.as_str())
        .bind(active)
        .bind(&password_hash)
        .bind(user_id)
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Delete a user
    pub async fn delete_user(&self, organization_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND organization_id = $2")
            .bind(user_id)
            .bind(organization_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}
