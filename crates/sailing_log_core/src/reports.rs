//! crates/sailing_log_core/src/reports.rs
//!
//! Shapes aggregated metrics into the fleet-wide and per-boat report objects.

use serde::Serialize;

use crate::domain::{Boat, ReportActivity};
use crate::metrics::{
    calculate_total_metrics, group_by_boat_length, group_by_boat_type, group_by_month,
    group_by_purpose, group_by_year, GroupedMetrics, ReportMetrics,
};
use crate::ports::{DatabaseService, PortResult};

/// Usage across every boat in the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub total: ReportMetrics,
    #[cfg_attr(feature = "openapi", schema(value_type = std::collections::HashMap<String, ReportMetrics>))]
    pub by_boat_type: GroupedMetrics,
    #[cfg_attr(feature = "openapi", schema(value_type = std::collections::HashMap<String, ReportMetrics>))]
    pub by_activity_type: GroupedMetrics,
    #[cfg_attr(feature = "openapi", schema(value_type = std::collections::HashMap<String, ReportMetrics>))]
    pub by_boat_length: GroupedMetrics,
}

/// Usage of a single boat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BoatReport {
    pub boat_id: i64,
    pub boat_name: String,
    pub total: ReportMetrics,
    #[cfg_attr(feature = "openapi", schema(value_type = std::collections::HashMap<String, ReportMetrics>))]
    pub by_activity_type: GroupedMetrics,
    #[cfg_attr(feature = "openapi", schema(value_type = std::collections::HashMap<String, ReportMetrics>))]
    pub by_month: GroupedMetrics,
    #[cfg_attr(feature = "openapi", schema(value_type = std::collections::HashMap<String, ReportMetrics>))]
    pub by_year: GroupedMetrics,
}

pub fn assemble_fleet_report(activities: &[ReportActivity]) -> FleetReport {
    FleetReport {
        total: calculate_total_metrics(activities),
        by_boat_type: group_by_boat_type(activities),
        by_activity_type: group_by_purpose(activities),
        by_boat_length: group_by_boat_length(activities),
    }
}

pub fn assemble_boat_report(boat: &Boat, activities: &[ReportActivity]) -> BoatReport {
    BoatReport {
        boat_id: boat.id,
        boat_name: boat.name.clone(),
        total: calculate_total_metrics(activities),
        by_activity_type: group_by_purpose(activities),
        by_month: group_by_month(activities),
        by_year: group_by_year(activities),
    }
}

/// Builds the fleet report from every activity currently in the store.
pub async fn fleet_report(db: &dyn DatabaseService) -> PortResult<FleetReport> {
    let activities = db.list_report_activities(None).await?;
    Ok(assemble_fleet_report(&activities))
}

/// Builds the report for one boat.
///
/// The boat is resolved first; an unknown id returns `PortError::NotFound`
/// without loading any activities.
pub async fn boat_report(db: &dyn DatabaseService, boat_id: i64) -> PortResult<BoatReport> {
    let boat = db.get_boat(boat_id).await?;
    let activities = db.list_report_activities(Some(boat.id)).await?;
    Ok(assemble_boat_report(&boat, &activities))
}
