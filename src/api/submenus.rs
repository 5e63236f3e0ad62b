//! Submenu handlers
//!
//! `/api/v1/menus/{menu_id}/submenus[/{submenu_id}]`

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::handlers::AppState;
use crate::db::submenus;
use crate::error::{ApiError, Entity, Result};
use crate::models::{DeleteResponse, ListParams, SubMenuCreate, SubMenuResponse, SubMenuUpdate};

/// Handler for POST /menus/:menu_id/submenus
pub async fn create_submenu(
    State(state): State<AppState>,
    Path(menu_id): Path<i64>,
    payload: std::result::Result<Json<SubMenuCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<SubMenuResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let submenu = submenus::create(&state.db, menu_id, &req).await?;
    info!(
        "Created submenu {} '{}' in menu {}",
        submenu.id, submenu.title, menu_id
    );

    Ok((StatusCode::CREATED, Json(submenu.into())))
}

/// Handler for GET /menus/:menu_id/submenus
pub async fn list_submenus(
    State(state): State<AppState>,
    Path(menu_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<SubMenuResponse>>> {
    let submenus = submenus::list(&state.db, menu_id, &params).await?;
    Ok(Json(submenus.into_iter().map(Into::into).collect()))
}

/// Handler for GET /menus/:menu_id/submenus/:submenu_id
pub async fn get_submenu(
    State(state): State<AppState>,
    Path((menu_id, submenu_id)): Path<(i64, i64)>,
) -> Result<Json<SubMenuResponse>> {
    let submenu = submenus::get(&state.db, menu_id, submenu_id).await?;
    Ok(Json(submenu.into()))
}

/// Handler for PATCH /menus/:menu_id/submenus/:submenu_id
pub async fn update_submenu(
    State(state): State<AppState>,
    Path((menu_id, submenu_id)): Path<(i64, i64)>,
    payload: std::result::Result<Json<SubMenuUpdate>, JsonRejection>,
) -> Result<Json<SubMenuResponse>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let submenu = submenus::update(&state.db, menu_id, submenu_id, &req).await?;
    Ok(Json(submenu.into()))
}

/// Handler for DELETE /menus/:menu_id/submenus/:submenu_id
pub async fn delete_submenu(
    State(state): State<AppState>,
    Path((menu_id, submenu_id)): Path<(i64, i64)>,
) -> Result<Json<DeleteResponse>> {
    if submenus::delete(&state.db, menu_id, submenu_id).await? {
        info!("Deleted submenu {} of menu {}", submenu_id, menu_id);
    }
    Ok(Json(DeleteResponse::new(Entity::SubMenu)))
}
