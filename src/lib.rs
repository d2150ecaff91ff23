pub mod auth;
pub mod billing;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

use crate::middleware::{require_auth, require_super_admin, with_profile, with_tenant};

/// Build the full application router around the given state
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .route("/auth/login", post(handlers::public::auth::login))
        // Tenant-scoped API
        .merge(tenant_routes(&state))
        // Platform administration
        .merge(admin_routes(&state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Routes behind the full tenant gate: auth -> profile+tenant resolution
fn tenant_routes(state: &AppState) -> Router<AppState> {
    use handlers::protected::{athletes, auth, billing};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/billing/plans", get(billing::list_plans))
        .route("/api/billing/subscription", get(billing::current_subscription))
        .route("/api/billing/preview", post(billing::preview_change))
        .route("/api/billing/change-plan", post(billing::change_plan))
        .route(
            "/api/athletes",
            get(athletes::list_athletes).post(athletes::create_athlete),
        )
        .layer(axum::middleware::from_fn_with_state(state.clone(), with_tenant))
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
}

/// Routes for platform administrators: profile gate only, since a super
/// admin profile is not bound to any tenant
fn admin_routes(state: &AppState) -> Router<AppState> {
    use handlers::admin::tenants;

    Router::new()
        .route(
            "/api/admin/tenants",
            get(tenants::list_tenants).post(tenants::create_tenant),
        )
        .layer(axum::middleware::from_fn(require_super_admin))
        .layer(axum::middleware::from_fn_with_state(state.clone(), with_profile))
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
}
