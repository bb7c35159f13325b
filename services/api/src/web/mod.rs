pub mod activities;
pub mod auth;
pub mod boats;
pub mod middleware;
pub mod reports;
pub mod rest;
pub mod router;
pub mod state;

// Re-export the handlers so callers can reach them from one place.
pub use activities::{
    create_activity_handler, delete_activity_handler, get_activity_handler,
    list_activities_handler, update_activity_handler,
};
pub use auth::check_auth_handler;
pub use boats::{
    create_boat_handler, delete_boat_handler, get_boat_handler, list_boat_activities_handler,
    list_boats_handler, update_boat_handler,
};
pub use middleware::require_auth;
pub use reports::{boat_report_handler, fleet_report_handler};
pub use rest::health_handler;
pub use router::create_router;
