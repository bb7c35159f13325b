//! services/api/src/web/activities.rs
//!
//! Axum handlers for the sailing activity endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sailing_log_core::domain::{NewActivity, SailingActivity};
use sailing_log_core::pagination::{create_pagination_meta, ACTIVITY_SORT_FIELDS};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::IntoParams;

use crate::web::rest::{port_error, ActivityPage, HandlerError, ListQuery};
use crate::web::state::AppState;

/// Optional filter for the activity list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ActivityFilter {
    /// Only return activities logged against this boat.
    pub boat_id: Option<String>,
}

impl ActivityFilter {
    fn boat_id(&self) -> Result<Option<i64>, HandlerError> {
        match self.boat_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("boatId must be an integer, got '{}'", raw),
                )
            }),
        }
    }
}

/// List activities, optionally for a single boat.
#[utoipa::path(
    get,
    path = "/activities",
    tag = "activities",
    params(ActivityFilter, ListQuery),
    responses(
        (status = 200, description = "A page of activities", body = ActivityPage),
        (status = 400, description = "Malformed boatId")
    )
)]
pub async fn list_activities_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ActivityFilter>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ActivityPage>, HandlerError> {
    let boat_id = filter.boat_id()?;
    let params = query.pagination(ACTIVITY_SORT_FIELDS);
    let page = state
        .db
        .list_activities(boat_id, &params)
        .await
        .map_err(|e| port_error("Failed to list activities", e))?;

    Ok(Json(ActivityPage {
        data: page.items,
        meta: create_pagination_meta(params.page, params.limit, page.total),
    }))
}

/// Fetch one activity.
#[utoipa::path(
    get,
    path = "/activities/{id}",
    tag = "activities",
    params(("id" = i64, Path, description = "Activity id")),
    responses(
        (status = 200, description = "The activity", body = SailingActivity),
        (status = 404, description = "No such activity")
    )
)]
pub async fn get_activity_handler(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<SailingActivity>, HandlerError> {
    let activity = state
        .db
        .get_activity(activity_id)
        .await
        .map_err(|e| port_error("Failed to load activity", e))?;
    Ok(Json(activity))
}

/// Log a new activity against an existing boat.
#[utoipa::path(
    post,
    path = "/activities",
    tag = "activities",
    request_body = NewActivity,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Activity logged", body = SailingActivity),
        (status = 400, description = "Invalid activity"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "The referenced boat does not exist")
    )
)]
pub async fn create_activity_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewActivity>,
) -> Result<(StatusCode, Json<SailingActivity>), HandlerError> {
    payload
        .validate()
        .map_err(|e| port_error("Invalid activity", e.into()))?;

    let activity = state
        .db
        .create_activity(payload)
        .await
        .map_err(|e| port_error("Failed to create activity", e))?;

    info!(activity_id = activity.id, boat_id = activity.boat_id, "Logged activity");
    Ok((StatusCode::CREATED, Json(activity)))
}

/// Replace an activity's editable fields.
#[utoipa::path(
    put,
    path = "/activities/{id}",
    tag = "activities",
    params(("id" = i64, Path, description = "Activity id")),
    request_body = NewActivity,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Activity updated", body = SailingActivity),
        (status = 400, description = "Invalid activity"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such activity or boat")
    )
)]
pub async fn update_activity_handler(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
    Json(payload): Json<NewActivity>,
) -> Result<Json<SailingActivity>, HandlerError> {
    payload
        .validate()
        .map_err(|e| port_error("Invalid activity", e.into()))?;

    let activity = state
        .db
        .update_activity(activity_id, payload)
        .await
        .map_err(|e| port_error("Failed to update activity", e))?;

    info!(activity_id, "Updated activity");
    Ok(Json(activity))
}

/// Delete one activity.
#[utoipa::path(
    delete,
    path = "/activities/{id}",
    tag = "activities",
    params(("id" = i64, Path, description = "Activity id")),
    security(("bearer_token" = [])),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such activity")
    )
)]
pub async fn delete_activity_handler(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<StatusCode, HandlerError> {
    state
        .db
        .delete_activity(activity_id)
        .await
        .map_err(|e| port_error("Failed to delete activity", e))?;

    info!(activity_id, "Deleted activity");
    Ok(StatusCode::NO_CONTENT)
}
