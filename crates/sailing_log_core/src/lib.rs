pub mod domain;
pub mod metrics;
pub mod pagination;
pub mod ports;
pub mod reports;

pub use domain::{
    Boat, BoatProfile, BoatType, NewActivity, NewBoat, Purpose, ReportActivity, SailingActivity,
    SeaState, ValidationError, WeatherConditions, WindDirection,
};
pub use metrics::{
    calculate_total_metrics, group_activities_by_field, GroupedMetrics, ReportMetrics,
};
pub use pagination::{
    create_pagination_meta, parse_pagination_params, PaginationMeta, PaginationParams, SortOrder,
};
pub use ports::{DatabaseService, Page, PortError, PortResult};
pub use reports::{boat_report, fleet_report, BoatReport, FleetReport};
