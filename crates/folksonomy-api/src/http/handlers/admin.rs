//! Admin configuration endpoint.

use axum::extract::State;
use axum::Json;

use folksonomy_core::admin::AdminSite;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

/// GET /admin/v1/models - every registered model's admin options.
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdminSite>>, AppError> {
    let ctx = RequestContext::new();
    let mut resp = ctx.success(state.admin.as_ref().clone());
    for (model, href) in [
        ("tag", "/tags"),
        ("skill", "/skills"),
        ("skill_category", "/categories"),
        ("user", "/users"),
        ("user_skill", "/user-skills"),
    ] {
        resp = resp.with_link(model, href);
    }
    Ok(Json(resp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_models_have_links() {
        let state = test_state().await;
        let resp = list_models(State(state)).await.unwrap().0;
        let site = resp.data.as_ref().unwrap();
        assert_eq!(site.models.len(), 5);
        for model in &site.models {
            assert!(resp.links.contains_key(model.model), "no link for {}", model.model);
        }
        assert_eq!(resp.links["user_skill"], "/admin/v1/user-skills");
    }
}
