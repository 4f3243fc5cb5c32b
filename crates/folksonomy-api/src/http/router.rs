//! Axum router configuration with middleware.
//!
//! All admin routes are under `/admin/v1/`; `/health` sits outside the prefix.
//! Middleware: CORS, request tracing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::response::API_PREFIX;
use crate::state::AppState;

/// Build the complete admin router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin_routes = Router::new()
        // Tags
        .route(
            "/tags",
            get(handlers::tag::list_tags).post(handlers::tag::create_tag),
        )
        .route(
            "/tags/{id}",
            get(handlers::tag::get_tag)
                .put(handlers::tag::update_tag)
                .delete(handlers::tag::delete_tag),
        )
        .route("/tags/actions/accept", post(handlers::tag::accept_tags))
        .route("/tags/actions/reject", post(handlers::tag::reject_tags))
        // Skills
        .route(
            "/skills",
            get(handlers::skill::list_skills).post(handlers::skill::create_skill),
        )
        .route(
            "/skills/{id}",
            get(handlers::skill::get_skill)
                .put(handlers::skill::update_skill)
                .delete(handlers::skill::delete_skill),
        )
        .route(
            "/skills/{id}/categories",
            get(handlers::skill::get_skill_categories).put(handlers::skill::set_skill_categories),
        )
        .route("/skills/actions/accept", post(handlers::skill::accept_skills))
        .route("/skills/actions/reject", post(handlers::skill::reject_skills))
        // Categories
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/categories/{id}",
            delete(handlers::category::delete_category),
        )
        // Users
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route("/users/{id}", delete(handlers::user::delete_user))
        // User skills
        .route(
            "/user-skills",
            get(handlers::user_skill::list_user_skills).post(handlers::user_skill::assign_skill),
        )
        .route(
            "/user-skills/{id}",
            put(handlers::user_skill::update_user_skill)
                .delete(handlers::user_skill::delete_user_skill),
        )
        // Admin configuration
        .route("/models", get(handlers::admin::list_models));

    Router::new()
        .nest(API_PREFIX, admin_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - version and database reachability.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match state.db_pool.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}
