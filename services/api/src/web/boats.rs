//! services/api/src/web/boats.rs
//!
//! Axum handlers for the boat endpoints. Reads are public; writes sit behind
//! `require_auth` in the router.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sailing_log_core::domain::{Boat, NewBoat};
use sailing_log_core::pagination::{create_pagination_meta, ACTIVITY_SORT_FIELDS, BOAT_SORT_FIELDS};
use std::sync::Arc;
use tracing::info;

use crate::web::rest::{port_error, ActivityPage, BoatPage, HandlerError, ListQuery};
use crate::web::state::AppState;

/// List boats, one page at a time.
#[utoipa::path(
    get,
    path = "/boats",
    tag = "boats",
    params(ListQuery),
    responses(
        (status = 200, description = "A page of boats", body = BoatPage),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_boats_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<BoatPage>, HandlerError> {
    let params = query.pagination(BOAT_SORT_FIELDS);
    let page = state
        .db
        .list_boats(&params)
        .await
        .map_err(|e| port_error("Failed to list boats", e))?;

    Ok(Json(BoatPage {
        data: page.items,
        meta: create_pagination_meta(params.page, params.limit, page.total),
    }))
}

/// Fetch one boat.
#[utoipa::path(
    get,
    path = "/boats/{id}",
    tag = "boats",
    params(("id" = i64, Path, description = "Boat id")),
    responses(
        (status = 200, description = "The boat", body = Boat),
        (status = 404, description = "No such boat")
    )
)]
pub async fn get_boat_handler(
    State(state): State<Arc<AppState>>,
    Path(boat_id): Path<i64>,
) -> Result<Json<Boat>, HandlerError> {
    let boat = state
        .db
        .get_boat(boat_id)
        .await
        .map_err(|e| port_error("Failed to load boat", e))?;
    Ok(Json(boat))
}

/// Add a boat to the fleet.
#[utoipa::path(
    post,
    path = "/boats",
    tag = "boats",
    request_body = NewBoat,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Boat created", body = Boat),
        (status = 400, description = "Invalid boat"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_boat_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBoat>,
) -> Result<(StatusCode, Json<Boat>), HandlerError> {
    payload
        .validate()
        .map_err(|e| port_error("Invalid boat", e.into()))?;

    let boat = state
        .db
        .create_boat(payload)
        .await
        .map_err(|e| port_error("Failed to create boat", e))?;

    info!(boat_id = boat.id, name = %boat.name, "Created boat");
    Ok((StatusCode::CREATED, Json(boat)))
}

/// Replace a boat's editable fields.
#[utoipa::path(
    put,
    path = "/boats/{id}",
    tag = "boats",
    params(("id" = i64, Path, description = "Boat id")),
    request_body = NewBoat,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Boat updated", body = Boat),
        (status = 400, description = "Invalid boat"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such boat")
    )
)]
pub async fn update_boat_handler(
    State(state): State<Arc<AppState>>,
    Path(boat_id): Path<i64>,
    Json(payload): Json<NewBoat>,
) -> Result<Json<Boat>, HandlerError> {
    payload
        .validate()
        .map_err(|e| port_error("Invalid boat", e.into()))?;

    let boat = state
        .db
        .update_boat(boat_id, payload)
        .await
        .map_err(|e| port_error("Failed to update boat", e))?;

    info!(boat_id, "Updated boat");
    Ok(Json(boat))
}

/// Delete a boat together with its logged activities.
#[utoipa::path(
    delete,
    path = "/boats/{id}",
    tag = "boats",
    params(("id" = i64, Path, description = "Boat id")),
    security(("bearer_token" = [])),
    responses(
        (status = 204, description = "Boat deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such boat")
    )
)]
pub async fn delete_boat_handler(
    State(state): State<Arc<AppState>>,
    Path(boat_id): Path<i64>,
) -> Result<StatusCode, HandlerError> {
    state
        .db
        .delete_boat(boat_id)
        .await
        .map_err(|e| port_error("Failed to delete boat", e))?;

    info!(boat_id, "Deleted boat");
    Ok(StatusCode::NO_CONTENT)
}

/// List the activities logged against one boat.
#[utoipa::path(
    get,
    path = "/boats/{id}/activities",
    tag = "boats",
    params(("id" = i64, Path, description = "Boat id"), ListQuery),
    responses(
        (status = 200, description = "A page of the boat's activities", body = ActivityPage),
        (status = 404, description = "No such boat")
    )
)]
pub async fn list_boat_activities_handler(
    State(state): State<Arc<AppState>>,
    Path(boat_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ActivityPage>, HandlerError> {
    let boat = state
        .db
        .get_boat(boat_id)
        .await
        .map_err(|e| port_error("Failed to load boat", e))?;

    let params = query.pagination(ACTIVITY_SORT_FIELDS);
    let page = state
        .db
        .list_activities(Some(boat.id), &params)
        .await
        .map_err(|e| port_error("Failed to list activities", e))?;

    Ok(Json(ActivityPage {
        data: page.items,
        meta: create_pagination_meta(params.page, params.limit, page.total),
    }))
}
