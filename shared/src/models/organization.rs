//! Organization models for multi-tenancy
//!
//! Each organization is an isolation boundary: every product, category,
//! movement, and user belongs to exactly one organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization (tenant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    /// URL-friendly unique identifier
    pub slug: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an organization
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganizationInput {
    pub name: String,
    pub slug: String,
}

/// Input for updating an organization's profile; absent fields are kept
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrganizationInput {
    pub name: Option<String>,
    pub active: Option<bool>,
}
