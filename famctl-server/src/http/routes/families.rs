//! Family endpoints - admin listing and per-user detail

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use famctl_core::{Family, FamilyDetail, FamilyService};

use crate::db::UserRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;

/// Query parameters for the family listing
#[derive(Debug, Default, Deserialize)]
pub struct FamilyListParams {
    pub search: Option<String>,
}

/// GET /families - every non-admin family, optionally filtered
async fn list_families(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FamilyListParams>,
) -> Result<Json<Vec<Family>>, ApiError> {
    let families = FamilyService::new(UserRepo::new(&state.pool))
        .list_families(params.search.as_deref())
        .await?;
    Ok(Json(families))
}

/// GET /families/{id} - one family with tutors per child
async fn get_family(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<FamilyDetail>, ApiError> {
    let detail = FamilyService::new(UserRepo::new(&state.pool))
        .get_family_detail(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("family", user_id))?;
    Ok(Json(detail))
}

/// Family routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/families", get(list_families))
        .route("/families/{id}", get(get_family))
}
