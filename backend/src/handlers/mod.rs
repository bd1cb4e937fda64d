//! HTTP handlers for the StockLens API

pub mod auth;
pub mod category;
pub mod dashboard;
pub mod health;
pub mod insights;
pub mod movement;
pub mod organization;
pub mod product;
pub mod reports;
pub mod user;

pub use auth::*;
pub use category::*;
pub use dashboard::*;
pub use health::*;
pub use insights::*;
pub use movement::*;
pub use organization::*;
pub use product::*;
pub use reports::*;
pub use user::*;
