//! Dish handlers
//!
//! `/api/v1/menus/{menu_id}/submenus/{submenu_id}/dishes[/{dish_id}]`

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::handlers::AppState;
use crate::db::dishes;
use crate::error::{ApiError, Entity, Result};
use crate::models::{DeleteResponse, DishCreate, DishResponse, DishUpdate, ListParams};

/// Handler for POST /menus/:menu_id/submenus/:submenu_id/dishes
pub async fn create_dish(
    State(state): State<AppState>,
    Path((menu_id, submenu_id)): Path<(i64, i64)>,
    payload: std::result::Result<Json<DishCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DishResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let dish = dishes::create(&state.db, menu_id, submenu_id, &req).await?;
    info!(
        "Created dish {} '{}' in submenu {}",
        dish.id, dish.title, submenu_id
    );

    Ok((StatusCode::CREATED, Json(dish.into())))
}

/// Handler for GET /menus/:menu_id/submenus/:submenu_id/dishes
pub async fn list_dishes(
    State(state): State<AppState>,
    Path((menu_id, submenu_id)): Path<(i64, i64)>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DishResponse>>> {
    let dishes = dishes::list(&state.db, menu_id, submenu_id, &params).await?;
    Ok(Json(dishes.into_iter().map(Into::into).collect()))
}

/// Handler for GET /menus/:menu_id/submenus/:submenu_id/dishes/:dish_id
pub async fn get_dish(
    State(state): State<AppState>,
    Path((menu_id, submenu_id, dish_id)): Path<(i64, i64, i64)>,
) -> Result<Json<DishResponse>> {
    let dish = dishes::get(&state.db, menu_id, submenu_id, dish_id).await?;
    Ok(Json(dish.into()))
}

/// Handler for PATCH /menus/:menu_id/submenus/:submenu_id/dishes/:dish_id
pub async fn update_dish(
    State(state): State<AppState>,
    Path((menu_id, submenu_id, dish_id)): Path<(i64, i64, i64)>,
    payload: std::result::Result<Json<DishUpdate>, JsonRejection>,
) -> Result<Json<DishResponse>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let dish = dishes::update(&state.db, menu_id, submenu_id, dish_id, &req).await?;
    Ok(Json(dish.into()))
}

/// Handler for DELETE /menus/:menu_id/submenus/:submenu_id/dishes/:dish_id
pub async fn delete_dish(
    State(state): State<AppState>,
    Path((menu_id, submenu_id, dish_id)): Path<(i64, i64, i64)>,
) -> Result<Json<DeleteResponse>> {
    if dishes::delete(&state.db, menu_id, submenu_id, dish_id).await? {
        info!("Deleted dish {} of submenu {}", dish_id, submenu_id);
    }
    Ok(Json(DeleteResponse::new(Entity::Dish)))
}
