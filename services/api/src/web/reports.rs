//! services/api/src/web/reports.rs
//!
//! Axum handlers for the usage reports. The reports are computed fresh from the
//! store on every request.

use axum::{
    extract::{Path, State},
    Json,
};
use sailing_log_core::reports::{self, BoatReport, FleetReport};
use std::sync::Arc;

use crate::web::rest::{port_error, HandlerError};
use crate::web::state::AppState;

/// Hours, distance, and trip counts across the whole fleet.
#[utoipa::path(
    get,
    path = "/reports/fleet",
    tag = "reports",
    responses(
        (status = 200, description = "Fleet report", body = FleetReport),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn fleet_report_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FleetReport>, HandlerError> {
    let report = reports::fleet_report(state.db.as_ref())
        .await
        .map_err(|e| port_error("Failed to build fleet report", e))?;
    Ok(Json(report))
}

/// Hours, distance, and trip counts for one boat, by purpose, month, and year.
#[utoipa::path(
    get,
    path = "/reports/boats/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Boat id")),
    responses(
        (status = 200, description = "Boat report", body = BoatReport),
        (status = 404, description = "No such boat")
    )
)]
pub async fn boat_report_handler(
    State(state): State<Arc<AppState>>,
    Path(boat_id): Path<i64>,
) -> Result<Json<BoatReport>, HandlerError> {
    let report = reports::boat_report(state.db.as_ref(), boat_id)
        .await
        .map_err(|e| port_error("Failed to build boat report", e))?;
    Ok(Json(report))
}
