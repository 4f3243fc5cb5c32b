//! Tag handlers: CRUD plus the accept/reject bulk actions.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use folksonomy_core::admin::TagRow;
use folksonomy_core::service::approval::{ApprovalAction, BulkActionReport};
use folksonomy_infra::config::resolve_list_limit;
use folksonomy_types::id::TagId;
use folksonomy_types::tag::{CreateTagRequest, Tag, UpdateTagRequest};

use crate::http::error::AppError;
use crate::http::extractors::query::{BulkActionBody, TaggableListQuery};
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

/// Result of a bulk action, with the admin's message.
#[derive(Debug, Serialize)]
pub struct BulkActionResult {
    pub action: ApprovalAction,
    pub processed: usize,
    pub message: String,
}

impl BulkActionResult {
    pub fn new(state: &AppState, model: &str, report: BulkActionReport) -> Result<Self, AppError> {
        let model = state
            .admin
            .get(model)
            .ok_or_else(|| AppError::Internal(format!("model '{model}' is not registered")))?;
        Ok(Self {
            action: report.action,
            processed: report.processed,
            message: model.action_message(&report),
        })
    }
}

/// GET /admin/v1/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Query(query): Query<TaggableListQuery>,
) -> Result<Json<ApiResponse<Vec<TagRow>>>, AppError> {
    let ctx = RequestContext::new();
    let filter = query.tag_filter(resolve_list_limit(&state.config, query.limit))?;
    let rows = state.tag_service.list_rows(Some(filter)).await?;
    Ok(Json(ctx.success(rows).with_link("self", "/tags")))
}

/// POST /admin/v1/tags
pub async fn create_tag(
    State(state): State<AppState>,
    Json(body): Json<CreateTagRequest>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    let ctx = RequestContext::new();
    let tag = state.tag_service.create_tag(body).await?;
    let href = format!("/tags/{}", tag.id);
    Ok(Json(ctx.success(tag).with_link("self", &href)))
}

/// GET /admin/v1/tags/{id} - by id or name.
pub async fn get_tag(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    let ctx = RequestContext::new();
    let tag = state.tag_service.resolve(&reference).await?;
    let href = format!("/tags/{}", tag.id);
    Ok(Json(ctx.success(tag).with_link("self", &href)))
}

/// PUT /admin/v1/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Json(body): Json<UpdateTagRequest>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    let ctx = RequestContext::new();
    let tag = state.tag_service.resolve(&reference).await?;
    let updated = state.tag_service.update_tag(&tag.id, body).await?;
    let href = format!("/tags/{}", updated.id);
    Ok(Json(ctx.success(updated).with_link("self", &href)))
}

/// DELETE /admin/v1/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestContext::new();
    let tag = state.tag_service.resolve(&reference).await?;
    state.tag_service.delete_tag(&tag.id).await?;
    Ok(Json(ctx.success(serde_json::json!({
        "deleted": true,
        "id": tag.id,
    }))))
}

async fn bulk(
    state: AppState,
    body: BulkActionBody,
    action: ApprovalAction,
) -> Result<Json<ApiResponse<BulkActionResult>>, AppError> {
    let ctx = RequestContext::new();
    let ids: Vec<TagId> = body.parse_ids()?;
    let report = state.tag_service.bulk(&ids, action).await?;
    let result = BulkActionResult::new(&state, "tag", report)?;
    Ok(Json(ctx.success(result).with_link("tags", "/tags")))
}

/// POST /admin/v1/tags/actions/accept
pub async fn accept_tags(
    State(state): State<AppState>,
    Json(body): Json<BulkActionBody>,
) -> Result<Json<ApiResponse<BulkActionResult>>, AppError> {
    bulk(state, body, ApprovalAction::Accept).await
}

/// POST /admin/v1/tags/actions/reject
pub async fn reject_tags(
    State(state): State<AppState>,
    Json(body): Json<BulkActionBody>,
) -> Result<Json<ApiResponse<BulkActionResult>>, AppError> {
    bulk(state, body, ApprovalAction::Reject).await
}
