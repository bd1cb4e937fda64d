//! Domain models for the StockLens inventory platform

mod category;
mod movement;
mod organization;
mod product;
mod report;
mod user;

pub use category::*;
pub use movement::*;
pub use organization::*;
pub use product::*;
pub use report::*;
pub use user::*;
