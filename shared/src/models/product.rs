//! Product models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A product tracked in inventory
///
/// `quantity` is mutated only by movement application; reports treat it as
/// the sum of entry quantities minus exit quantities since creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub sku: String,
    /// Unit sale price
    pub price: Decimal,
    /// Unit cost price
    pub cost_price: Decimal,
    pub quantity: i32,
    /// Stock level at which the product is considered low
    pub alert_level: i32,
    /// Days between placing a restock order and receiving it
    pub lead_time_days: i32,
    /// Soft-delete marker; active queries exclude deleted products
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductInput {
    pub category_id: Uuid,
    #[validate(length(min = 2, max = 150))]
    pub name: String,
    #[validate(length(min = 3, max = 80))]
    pub sku: String,
    pub price: Decimal,
    pub cost_price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub alert_level: i32,
    #[validate(range(min = 0))]
    pub lead_time_days: i32,
}

/// Input for updating a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductInput {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 2, max = 150))]
    pub name: Option<String>,
    #[validate(length(min = 3, max = 80))]
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub alert_level: Option<i32>,
    #[validate(range(min = 0))]
    pub lead_time_days: Option<i32>,
}

/// Compact product view used inside reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub quantity: i32,
    pub alert_level: i32,
}
