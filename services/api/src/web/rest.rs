//! services/api/src/web/rest.rs
//!
//! Shared pieces of the REST API: the master OpenAPI definition, list query and
//! envelope types, and the translation of port errors into HTTP statuses.

use axum::{http::StatusCode, Json};
use sailing_log_core::domain::{
    Boat, BoatType, NewActivity, NewBoat, Purpose, SailingActivity, SeaState, WeatherConditions,
    WindDirection,
};
use sailing_log_core::metrics::ReportMetrics;
use sailing_log_core::pagination::{
    parse_pagination_params, PaginationMeta, PaginationParams, SortOrder,
};
use sailing_log_core::ports::PortError;
use sailing_log_core::reports::{BoatReport, FleetReport};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    IntoParams, Modify, OpenApi, ToSchema,
};

use crate::web::{activities, auth, boats, reports};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        auth::check_auth_handler,
        boats::list_boats_handler,
        boats::get_boat_handler,
        boats::create_boat_handler,
        boats::update_boat_handler,
        boats::delete_boat_handler,
        boats::list_boat_activities_handler,
        activities::list_activities_handler,
        activities::get_activity_handler,
        activities::create_activity_handler,
        activities::update_activity_handler,
        activities::delete_activity_handler,
        reports::fleet_report_handler,
        reports::boat_report_handler,
    ),
    components(
        schemas(
            Boat, NewBoat, BoatType, SailingActivity, NewActivity, WindDirection,
            WeatherConditions, SeaState, Purpose, PaginationMeta, SortOrder, BoatPage,
            ActivityPage, ReportMetrics, FleetReport, BoatReport, HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Sailing Log API", description = "Boats, sailing activities, and usage reports.")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

//=========================================================================================
// Errors
//=========================================================================================

/// The error half of every handler result: a status and a plain-text reason.
pub type HandlerError = (StatusCode, String);

/// Maps a port failure to a response. Unexpected failures are logged and
/// reported with `context` only, never the underlying detail.
pub fn port_error(context: &str, err: PortError) -> HandlerError {
    match err {
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        PortError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        PortError::Unexpected(msg) => {
            error!("{}: {}", context, msg);
            (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
        }
    }
}

//=========================================================================================
// List Queries and Envelopes
//=========================================================================================

/// Paging and sorting for list endpoints. Values stay raw strings so malformed
/// input falls back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<String>,
    /// Rows per page, clamped to 1..=100. Defaults to 10.
    pub limit: Option<String>,
    /// Field to order by. Unknown fields fall back to `id`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
}

impl ListQuery {
    pub fn pagination(&self, allowed_sort_fields: &[&str]) -> PaginationParams {
        parse_pagination_params(
            self.page.as_deref(),
            self.limit.as_deref(),
            self.sort_by.as_deref(),
            self.sort_order.as_deref(),
            allowed_sort_fields,
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoatPage {
    pub data: Vec<Boat>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityPage {
    pub data: Vec<SailingActivity>,
    pub meta: PaginationMeta,
}

//=========================================================================================
// Health
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
