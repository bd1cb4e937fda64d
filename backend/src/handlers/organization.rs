//! HTTP handlers for the caller's organization profile

use axum::{extract::State, Json};

use shared::models::{Organization, UpdateOrganizationInput};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::organization::OrganizationService;
use crate::AppState;

/// Get the caller's organization
pub async fn get_my_organization(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Organization>> {
    let service = OrganizationService::new(state.db.clone());
    let organization = service
        .get_organization(current_user.0.organization_id)
        .await?;
    Ok(Json(organization))
}

/// Update the caller's organization (admin-only)
pub async fn update_my_organization(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdateOrganizationInput>,
) -> AppResult<Json<Organization>> {
    current_user.0.require_admin()?;
    let service = OrganizationService::new(state.db.clone());
    let organization = service
        .update_organization(current_user.0.organization_id, input)
        .await?;
    Ok(Json(organization))
}
