//! Authentication service
//!
//! Organization signup, credential login, and JWT issuance. Access and
//! refresh tokens carry the same claim set and differ only in lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use shared::models::{User, UserPublic};
use shared::types::Role;
use shared::validation::validate_slug;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt: JwtConfig,
}

/// Signup input: a new organization plus its first admin user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 200))]
    pub organization_name: String,
    #[validate(length(min = 1, max = 100))]
    pub organization_slug: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub full_name: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Refresh input
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshInput {
    pub refresh_token: String,
}

/// Token pair handed to clients after signup, login, or refresh
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserPublic,
}

/// JWT claims; must stay in sync with the auth middleware
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    organization_id: String,
    role: String,
    exp: i64,
    iat: i64,
}

/// Row for user queries, including the stored credential hash
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    organization_id: Uuid,
    email: String,
    full_name: Option<String>,
    role: String,
    password_hash: String,
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

const USER_COLUMNS: &str =
    "id, organization_id, email, full_name, role, password_hash, active, created_at";

impl AuthService {
    pub fn new(db: PgPool, jwt: JwtConfig) -> Self {
        Self { db, jwt }
    }

    /// Register a new organization together with its first admin user
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        validate_slug(&input.organization_slug).map_err(|msg| AppError::Validation {
            field: "organization_slug".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let slug_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM organizations WHERE slug = $1)",
        )
        .bind(&input.organization_slug)
        .fetch_one(&mut *tx)
        .await?;

        if slug_taken {
            return Err(AppError::DuplicateEntry("organization_slug".to_string()));
        }

        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&input.email)
                .fetch_one(&mut *tx)
                .await?;

        if email_taken {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let organization_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO organizations (name, slug) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.organization_name)
        .bind(&input.organization_slug)
        .fetch_one(&mut *tx)
        .await?;

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
        .bind(Role::Admin.as_str())
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let user = row.into_model()?;
        tracing::info!(organization_id = %organization_id, email = %user.email, "organization registered");

        self.issue_tokens(user)
    }

    /// Authenticate with email and password
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND active = TRUE"
        ))
        .bind(&input.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = bcrypt::verify(&input.password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let org_active = sqlx::query_scalar::<_, bool>(
            "SELECT active FROM organizations WHERE id = $1",
        )
        .bind(row.organization_id)
        .fetch_optional(&self.db)
        .await?
        .unwrap_or(false);

        if !org_active {
            return Err(AppError::InvalidCredentials);
        }

        let user = row.into_model()?;
        self.issue_tokens(user)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, input: RefreshInput) -> AppResult<AuthResponse> {
        let claims = self.decode(&input.refresh_token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND active = TRUE"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidToken)?;

        let user = row.into_model()?;
        self.issue_tokens(user)
    }

    /// Current user profile
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserPublic> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND active = TRUE"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(row.into_model()?.into())
    }

    fn issue_tokens(&self, user: User) -> AppResult<AuthResponse> {
        let access_token = self.encode(&user, self.jwt.access_token_expiry)?;
        let refresh_token = self.encode(&user, self.jwt.refresh_token_expiry)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.access_token_expiry,
            user: user.into(),
        })
    }

    fn encode(&self, user: &User, expiry_seconds: i64) -> AppResult<String> {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            organization_id: user.organization_id.to_string(),
            role: user.role.as_str().to_string(),
            exp: now + expiry_seconds,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
    }

    fn decode(&self, token: &str) -> AppResult<Claims> {
        use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
    }
}
