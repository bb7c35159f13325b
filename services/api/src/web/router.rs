//! services/api/src/web/router.rs
//!
//! Route table for the API. Reads are public; every write sits behind
//! `require_auth`.

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::{
    activities, auth, boats, middleware::require_auth, reports, rest, rest::ApiDoc,
    state::AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes (reads)
    let public_routes = Router::new()
        .route("/health", get(rest::health_handler))
        .route("/boats", get(boats::list_boats_handler))
        .route("/boats/{id}", get(boats::get_boat_handler))
        .route("/boats/{id}/activities", get(boats::list_boat_activities_handler))
        .route("/activities", get(activities::list_activities_handler))
        .route("/activities/{id}", get(activities::get_activity_handler))
        .route("/reports/fleet", get(reports::fleet_report_handler))
        .route("/reports/boats/{id}", get(reports::boat_report_handler));

    // Protected routes (writes)
    let protected_routes = Router::new()
        .route("/auth/check", get(auth::check_auth_handler))
        .route("/boats", post(boats::create_boat_handler))
        .route(
            "/boats/{id}",
            put(boats::update_boat_handler).delete(boats::delete_boat_handler),
        )
        .route("/activities", post(activities::create_activity_handler))
        .route(
            "/activities/{id}",
            put(activities::update_activity_handler).delete(activities::delete_activity_handler),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
