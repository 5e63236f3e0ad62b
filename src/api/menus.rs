//! Menu handlers
//!
//! `/api/v1/menus[/{menu_id}]`

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::handlers::AppState;
use crate::db::menus;
use crate::error::{ApiError, Entity, Result};
use crate::models::{DeleteResponse, ListParams, MenuCreate, MenuResponse, MenuUpdate};

/// Handler for POST /menus
pub async fn create_menu(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MenuCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let menu = menus::create(&state.db, &req).await?;
    info!("Created menu {} '{}'", menu.id, menu.title);

    Ok((StatusCode::CREATED, Json(menu.into())))
}

/// Handler for GET /menus
pub async fn list_menus(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<MenuResponse>>> {
    let menus = menus::list(&state.db, &params).await?;
    Ok(Json(menus.into_iter().map(Into::into).collect()))
}

/// Handler for GET /menus/:menu_id
pub async fn get_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<i64>,
) -> Result<Json<MenuResponse>> {
    let menu = menus::get(&state.db, menu_id).await?;
    Ok(Json(menu.into()))
}

/// Handler for PATCH /menus/:menu_id
pub async fn update_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<i64>,
    payload: std::result::Result<Json<MenuUpdate>, JsonRejection>,
) -> Result<Json<MenuResponse>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let menu = menus::update(&state.db, menu_id, &req).await?;
    Ok(Json(menu.into()))
}

/// Handler for DELETE /menus/:menu_id
///
/// Removes every submenu and dish under the menu.
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    if menus::delete(&state.db, menu_id).await? {
        info!("Deleted menu {}", menu_id);
    }
    Ok(Json(DeleteResponse::new(Entity::Menu)))
}
