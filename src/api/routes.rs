//! API Routes
//!
//! Configures the Axum router with all menu service endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::cache_layer::cache_responses;
use super::dishes::{create_dish, delete_dish, get_dish, list_dishes, update_dish};
use super::handlers::{health_handler, AppState};
use super::menus::{create_menu, delete_menu, get_menu, list_menus, update_menu};
use super::submenus::{create_submenu, delete_submenu, get_submenu, list_submenus, update_submenu};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/api/v1/menus` - menu collection and detail routes
/// - `/api/v1/menus/:menu_id/submenus` - submenus of one menu
/// - `/api/v1/menus/:menu_id/submenus/:submenu_id/dishes` - dishes of one submenu
/// - `GET /health` - Health check endpoint, never cached
///
/// Collection routes answer with and without a trailing slash.
///
/// # Middleware
/// - Cache: only when `state.cache` is set, on the `/api/v1` routes
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let menus = get(list_menus).post(create_menu);
    let submenus = get(list_submenus).post(create_submenu);
    let dishes = get(list_dishes).post(create_dish);

    let mut api = Router::new()
        .route("/menus", menus.clone())
        .route("/menus/", menus)
        .route(
            "/menus/:menu_id",
            get(get_menu).patch(update_menu).delete(delete_menu),
        )
        .route("/menus/:menu_id/submenus", submenus.clone())
        .route("/menus/:menu_id/submenus/", submenus)
        .route(
            "/menus/:menu_id/submenus/:submenu_id",
            get(get_submenu).patch(update_submenu).delete(delete_submenu),
        )
        .route("/menus/:menu_id/submenus/:submenu_id/dishes", dishes.clone())
        .route("/menus/:menu_id/submenus/:submenu_id/dishes/", dishes)
        .route(
            "/menus/:menu_id/submenus/:submenu_id/dishes/:dish_id",
            get(get_dish).patch(update_dish).delete(delete_dish),
        );

    if let Some(cache) = state.cache.clone() {
        api = api.route_layer(middleware::from_fn_with_state(cache, cache_responses));
    }

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    async fn create_test_app() -> Router {
        create_router(AppState::new(test_pool().await, None))
    }

    async fn status_of(app: Router, method: &str, uri: &str, body: &str) -> StatusCode {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;
        assert_eq!(status_of(app, "GET", "/health", "").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_collection_routes_accept_trailing_slash() {
        let app = create_test_app().await;
        assert_eq!(status_of(app.clone(), "GET", "/api/v1/menus", "").await, StatusCode::OK);
        assert_eq!(status_of(app, "GET", "/api/v1/menus/", "").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_menu_endpoint() {
        let app = create_test_app().await;
        let status = status_of(
            app,
            "POST",
            "/api/v1/menus/",
            r#"{"title":"Menu","description":"Desc"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_nested_not_found() {
        let app = create_test_app().await;
        let status = status_of(app, "GET", "/api/v1/menus/1/submenus/1/dishes/1", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let app = create_test_app().await;
        let status = status_of(app, "GET", "/api/v1/menus/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
