//! User-skill handlers: assign, relevel, unassign and list.

use axum::extract::{Path, Query, State};
use axum::Json;

use folksonomy_core::repository::user::UserSkillFilter;
use folksonomy_infra::config::resolve_list_limit;
use folksonomy_types::id::UserSkillId;
use folksonomy_types::user::{AssignSkillRequest, UpdateUserSkillRequest, UserSkill, UserSkillView};

use crate::http::error::AppError;
use crate::http::extractors::query::UserSkillListQuery;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

fn parse_id(raw: &str) -> Result<UserSkillId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("invalid user skill id '{raw}'")))
}

/// GET /admin/v1/user-skills - newest first.
pub async fn list_user_skills(
    State(state): State<AppState>,
    Query(query): Query<UserSkillListQuery>,
) -> Result<Json<ApiResponse<Vec<UserSkillView>>>, AppError> {
    let ctx = RequestContext::new();

    let user_id = match query.user.as_deref() {
        Some(reference) => Some(state.user_service.resolve_user(reference).await?.id),
        None => None,
    };
    let skill_id = match query.skill.as_deref() {
        Some(reference) => Some(state.skill_service.resolve_skill(reference).await?.id),
        None => None,
    };

    let rows = state
        .user_service
        .list_user_skills(Some(UserSkillFilter {
            user_id,
            skill_id,
            search: query.search,
            limit: Some(resolve_list_limit(&state.config, query.limit)),
            offset: query.offset,
        }))
        .await?;
    Ok(Json(ctx.success(rows).with_link("self", "/user-skills")))
}

/// POST /admin/v1/user-skills
pub async fn assign_skill(
    State(state): State<AppState>,
    Json(body): Json<AssignSkillRequest>,
) -> Result<Json<ApiResponse<UserSkill>>, AppError> {
    let ctx = RequestContext::new();
    let user_skill = state.user_service.assign_skill(body).await?;
    Ok(Json(ctx.success(user_skill).with_link("list", "/user-skills")))
}

/// PUT /admin/v1/user-skills/{id}
pub async fn update_user_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserSkillRequest>,
) -> Result<Json<ApiResponse<UserSkill>>, AppError> {
    let ctx = RequestContext::new();
    let id = parse_id(&id)?;
    let user_skill = state.user_service.set_level(&id, body.skill_level).await?;
    Ok(Json(ctx.success(user_skill)))
}

/// DELETE /admin/v1/user-skills/{id}
pub async fn delete_user_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestContext::new();
    let id = parse_id(&id)?;
    state.user_service.unassign(&id).await?;
    Ok(Json(ctx.success(serde_json::json!({
        "deleted": true,
        "id": id,
    }))))
}
