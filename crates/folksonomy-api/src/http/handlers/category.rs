//! Skill category handlers.

use axum::extract::{Path, Query, State};
use axum::Json;

use folksonomy_types::skill::{CreateCategoryRequest, SkillCategory};

use crate::http::error::AppError;
use crate::http::extractors::query::SearchQuery;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

/// GET /admin/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SkillCategory>>>, AppError> {
    let ctx = RequestContext::new();
    let categories = state.skill_service.list_categories(query.search).await?;
    Ok(Json(ctx.success(categories).with_link("self", "/categories")))
}

/// POST /admin/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<SkillCategory>>, AppError> {
    let ctx = RequestContext::new();
    let category = state.skill_service.create_category(body).await?;
    Ok(Json(ctx.success(category).with_link("list", "/categories")))
}

/// DELETE /admin/v1/categories/{id} - by id or name.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestContext::new();
    let category = state.skill_service.resolve_category(&reference).await?;
    state.skill_service.delete_category(&category.id).await?;
    Ok(Json(ctx.success(serde_json::json!({
        "deleted": true,
        "id": category.id,
    }))))
}
