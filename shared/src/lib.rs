//! Shared types and models for the StockLens inventory platform
//!
//! This crate contains types shared between the backend services,
//! the HTTP boundary, and the test suites.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
