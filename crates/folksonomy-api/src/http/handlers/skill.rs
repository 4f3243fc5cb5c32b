//! Skill handlers: the tag endpoints plus category links.

use axum::extract::{Path, Query, State};
use axum::Json;

use folksonomy_core::admin::SkillRow;
use folksonomy_core::service::approval::ApprovalAction;
use folksonomy_infra::config::resolve_list_limit;
use folksonomy_types::id::SkillId;
use folksonomy_types::skill::{Skill, SkillCategory, SkillDetail};
use folksonomy_types::tag::{CreateTagRequest, UpdateTagRequest};

use super::tag::BulkActionResult;
use crate::http::error::AppError;
use crate::http::extractors::query::{BulkActionBody, SkillCategoriesBody, TaggableListQuery};
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

/// GET /admin/v1/skills
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<TaggableListQuery>,
) -> Result<Json<ApiResponse<Vec<SkillRow>>>, AppError> {
    let ctx = RequestContext::new();
    let category = match query.category.as_deref() {
        Some(reference) => Some(state.skill_service.resolve_category(reference).await?.id),
        None => None,
    };
    let filter = query.skill_filter(category, resolve_list_limit(&state.config, query.limit))?;
    let rows = state.skill_service.list_rows(Some(filter)).await?;
    Ok(Json(ctx.success(rows).with_link("self", "/skills")))
}

/// POST /admin/v1/skills
pub async fn create_skill(
    State(state): State<AppState>,
    Json(body): Json<CreateTagRequest>,
) -> Result<Json<ApiResponse<Skill>>, AppError> {
    let ctx = RequestContext::new();
    let skill = state.skill_service.create_skill(body).await?;
    let href = format!("/skills/{}", skill.id);
    Ok(Json(ctx.success(skill).with_link("self", &href)))
}

/// GET /admin/v1/skills/{id} - with categories.
pub async fn get_skill(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<SkillDetail>>, AppError> {
    let ctx = RequestContext::new();
    let skill = state.skill_service.resolve_skill(&reference).await?;
    let detail = state.skill_service.get_skill_detail(&skill.id).await?;
    let href = format!("/skills/{}", skill.id);
    let categories = format!("{href}/categories");
    Ok(Json(
        ctx.success(detail)
            .with_link("self", &href)
            .with_link("categories", &categories),
    ))
}

/// PUT /admin/v1/skills/{id}
pub async fn update_skill(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Json(body): Json<UpdateTagRequest>,
) -> Result<Json<ApiResponse<Skill>>, AppError> {
    let ctx = RequestContext::new();
    let skill = state.skill_service.resolve_skill(&reference).await?;
    let updated = state.skill_service.update_skill(&skill.id, body).await?;
    let href = format!("/skills/{}", updated.id);
    Ok(Json(ctx.success(updated).with_link("self", &href)))
}

/// DELETE /admin/v1/skills/{id} - cascades to links and user skills.
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestContext::new();
    let skill = state.skill_service.resolve_skill(&reference).await?;
    state.skill_service.delete_skill(&skill.id).await?;
    Ok(Json(ctx.success(serde_json::json!({
        "deleted": true,
        "id": skill.id,
    }))))
}

async fn bulk(
    state: AppState,
    body: BulkActionBody,
    action: ApprovalAction,
) -> Result<Json<ApiResponse<BulkActionResult>>, AppError> {
    let ctx = RequestContext::new();
    let ids: Vec<SkillId> = body.parse_ids()?;
    let report = state.skill_service.bulk(&ids, action).await?;
    let result = BulkActionResult::new(&state, "skill", report)?;
    Ok(Json(ctx.success(result).with_link("skills", "/skills")))
}

/// POST /admin/v1/skills/actions/accept
pub async fn accept_skills(
    State(state): State<AppState>,
    Json(body): Json<BulkActionBody>,
) -> Result<Json<ApiResponse<BulkActionResult>>, AppError> {
    bulk(state, body, ApprovalAction::Accept).await
}

/// POST /admin/v1/skills/actions/reject
pub async fn reject_skills(
    State(state): State<AppState>,
    Json(body): Json<BulkActionBody>,
) -> Result<Json<ApiResponse<BulkActionResult>>, AppError> {
    bulk(state, body, ApprovalAction::Reject).await
}

/// GET /admin/v1/skills/{id}/categories
pub async fn get_skill_categories(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<Vec<SkillCategory>>>, AppError> {
    let ctx = RequestContext::new();
    let skill = state.skill_service.resolve_skill(&reference).await?;
    let categories = state.skill_service.skill_categories(&skill.id).await?;
    let href = format!("/skills/{}", skill.id);
    Ok(Json(ctx.success(categories).with_link("skill", &href)))
}

/// PUT /admin/v1/skills/{id}/categories - replace the linked set.
pub async fn set_skill_categories(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Json(body): Json<SkillCategoriesBody>,
) -> Result<Json<ApiResponse<Vec<SkillCategory>>>, AppError> {
    let ctx = RequestContext::new();
    let skill = state.skill_service.resolve_skill(&reference).await?;
    let categories = state
        .skill_service
        .set_skill_categories(&skill.id, &body.categories)
        .await?;
    let href = format!("/skills/{}", skill.id);
    Ok(Json(ctx.success(categories).with_link("skill", &href)))
}
