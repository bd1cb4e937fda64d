//! Route definitions for the StockLens Inventory Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (mostly public)
        .nest("/auth", auth_routes())
        // Protected routes
        .nest("/users", user_routes())
        .nest("/organizations", organization_routes())
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .nest("/movements", movement_routes())
        .nest("/reports", report_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/insights", insight_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .route(
            "/me",
            get(handlers::get_profile).route_layer(middleware::from_fn(auth_middleware)),
        )
}

/// User management routes (protected, admin-only inside the handlers)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:user_id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Organization profile routes (protected; updates are admin-only)
fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::get_my_organization).patch(handlers::update_my_organization),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Category management routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:category_id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product management routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/low-stock", get(handlers::get_low_stock_products))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:product_id/movements", get(handlers::get_product_movements))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock movement routes (protected)
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_movements).post(handlers::create_movement),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected, admin-only inside the handlers)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/abc", get(handlers::get_abc_report))
        .route("/xyz", get(handlers::get_xyz_report))
        .route("/turnover", get(handlers::get_turnover_report))
        .route("/financial", get(handlers::get_financial_report))
        .route("/forecast", get(handlers::get_forecast_report))
        .route("/overview", get(handlers::get_stock_overview))
        .route("/categories", get(handlers::get_category_breakdown))
        .route("/alerts", get(handlers::get_alerts_report))
        .route("/movements", get(handlers::get_movement_report))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dashboard routes (protected)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory-value", get(handlers::get_inventory_value))
        .route("/average-margin", get(handlers::get_average_margin))
        .route("/rupture-rate", get(handlers::get_stock_rupture_rate))
        .route("/sales-trend", get(handlers::get_sales_trend))
        .route("/top-products", get(handlers::get_top_products))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Insight routes (protected, admin-only inside the handlers)
fn insight_routes() -> Router<AppState> {
    Router::new()
        .route("/profitability", get(handlers::get_profitability_report))
        .route("/period-comparison", get(handlers::compare_periods))
        .route("/recommendations", get(handlers::get_recommendations))
        .route_layer(middleware::from_fn(auth_middleware))
}
