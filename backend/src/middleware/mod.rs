//! Request middleware for the StockLens platform

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
