//! User handlers.

use axum::extract::{Path, Query, State};
use axum::Json;

use folksonomy_types::user::{CreateUserRequest, User};

use crate::http::error::AppError;
use crate::http::extractors::query::SearchQuery;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

/// GET /admin/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<User>>>, AppError> {
    let ctx = RequestContext::new();
    let users = state.user_service.list_users(query.search).await?;
    Ok(Json(ctx.success(users).with_link("self", "/users")))
}

/// POST /admin/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let ctx = RequestContext::new();
    let user = state.user_service.create_user(body).await?;
    let skills = format!("/user-skills?user={}", user.id);
    Ok(Json(ctx.success(user).with_link("skills", &skills)))
}

/// DELETE /admin/v1/users/{id} - by id or username, with all assignments.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestContext::new();
    let user = state.user_service.resolve_user(&reference).await?;
    state.user_service.delete_user(&user.id).await?;
    Ok(Json(ctx.success(serde_json::json!({
        "deleted": true,
        "id": user.id,
    }))))
}
