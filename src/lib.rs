use axum::{middleware as axum_middleware, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod sql;

/// Assemble the full application router.
pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(company_routes())
        .merge(job_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/auth/token", post(auth::token_post))
        .route("/auth/register", post(auth::register_post))
}

fn company_routes() -> Router {
    use axum::routing::{patch, post};
    use handlers::companies;

    let public = Router::new()
        .route("/companies", get(companies::list))
        .route("/companies/:handle", get(companies::show));

    // Mutations require a logged-in admin; require_auth runs first and
    // injects the AuthUser that require_admin checks.
    let admin = Router::new()
        .route("/companies", post(companies::create))
        .route(
            "/companies/:handle",
            patch(companies::update).delete(companies::remove),
        )
        .route_layer(axum_middleware::from_fn(middleware::require_admin))
        .route_layer(axum_middleware::from_fn(middleware::require_auth));

    public.merge(admin)
}

fn job_routes() -> Router {
    use axum::routing::{patch, post};
    use handlers::jobs;

    let public = Router::new()
        .route("/jobs", get(jobs::list))
        .route("/jobs/:id", get(jobs::show));

    let admin = Router::new()
        .route("/jobs", post(jobs::create))
        .route("/jobs/:id", patch(jobs::update).delete(jobs::remove))
        .route_layer(axum_middleware::from_fn(middleware::require_admin))
        .route_layer(axum_middleware::from_fn(middleware::require_auth));

    public.merge(admin)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Jobly API",
        "version": version,
        "description": "Job board REST API: companies, jobs, and users",
        "endpoints": {
            "auth": "/auth/token, /auth/register (public)",
            "companies": "/companies (GET public; POST/PATCH/DELETE admin)",
            "jobs": "/jobs (GET public; POST/PATCH/DELETE admin)",
            "health": "/health"
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({ "status": "ok" }))
}
