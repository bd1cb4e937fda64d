//! Business logic services for the StockLens platform

pub mod auth;
pub mod category;
pub mod dashboard;
pub mod insights;
pub mod movement;
pub mod organization;
pub mod product;
pub mod reports;
pub mod user;

pub use auth::AuthService;
pub use category::CategoryService;
pub use dashboard::DashboardService;
pub use insights::InsightsService;
pub use movement::MovementService;
pub use organization::OrganizationService;
pub use product::ProductService;
pub use reports::ReportingService;
pub use user::UserService;
