//! Report payloads produced by the analytics engines
//!
//! All report items are computed fresh per request from current product and
//! movement state; nothing here is ever persisted or cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Category, Movement, ProductSummary};

/// ABC classification tier (Pareto value contribution)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl AbcClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        }
    }
}

/// XYZ classification tier (demand variability)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum XyzClass {
    X,
    Y,
    Z,
}

impl XyzClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            XyzClass::X => "X",
            XyzClass::Y => "Y",
            XyzClass::Z => "Z",
        }
    }
}

/// Forecast stock status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastStatus {
    Ok,
    Warning,
    Critical,
}

/// One product in the ABC report, ordered by consumption value descending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbcItem {
    pub product_id: Uuid,
    pub product_name: String,
    /// Exit quantity in window times unit price
    pub value: f64,
    pub percentage: f64,
    pub cumulative_percentage: f64,
    pub classification: AbcClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbcReport {
    pub items: Vec<AbcItem>,
}

/// One product in the XYZ report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XyzItem {
    pub product_id: Uuid,
    pub product_name: String,
    /// Coefficient of variation of weekly exit quantities
    pub cv: f64,
    pub classification: XyzClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XyzReport {
    pub items: Vec<XyzItem>,
}

/// One product in the turnover report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnoverItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub turnover_rate: f64,
    /// Current quantity as a stand-in for time-averaged inventory
    pub avg_inventory: f64,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnoverReport {
    pub items: Vec<TurnoverItem>,
}

/// Snapshot financial totals over all active products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    pub total_inventory_value: f64,
    pub total_cost_value: f64,
    pub potential_profit: f64,
    pub average_margin: f64,
}

/// One product in the forecast report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub daily_usage: f64,
    pub days_until_stockout: f64,
    pub reorder_point: i64,
    pub status: ForecastStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub items: Vec<ForecastItem>,
}

/// Consolidated stock metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockOverview {
    pub total_products: i64,
    pub total_stock_value: f64,
    pub low_stock_products: Vec<ProductSummary>,
    pub out_of_stock_products: Vec<ProductSummary>,
}

/// Quantity and value totals for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReportItem {
    pub category: Category,
    pub total_quantity: i64,
    pub total_value: f64,
}

/// Products at or below their alert level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsReport {
    pub critical_products: Vec<ProductSummary>,
}

/// Echo of the window a movement report was filtered by
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementReportFilters {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementReport {
    pub filters: MovementReportFilters,
    pub movements: Vec<Movement>,
}
