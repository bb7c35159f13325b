//! crates/sailing_log_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture: the report
//! assembler and the HTTP layer receive a `DatabaseService` explicitly instead of
//! reaching for a global store client.

use async_trait::async_trait;

use crate::domain::{Boat, NewActivity, NewBoat, ReportActivity, SailingActivity, ValidationError};
use crate::pagination::PaginationParams;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<ValidationError> for PortError {
    fn from(err: ValidationError) -> Self {
        PortError::Validation(err.to_string())
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// One page of rows plus the total number of rows matching the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Boats ---
    async fn get_boat(&self, boat_id: i64) -> PortResult<Boat>;

    async fn list_boats(&self, page: &PaginationParams) -> PortResult<Page<Boat>>;

    async fn create_boat(&self, boat: NewBoat) -> PortResult<Boat>;

    async fn update_boat(&self, boat_id: i64, boat: NewBoat) -> PortResult<Boat>;

    /// Deletes a boat and, through the store, every activity logged against it.
    async fn delete_boat(&self, boat_id: i64) -> PortResult<()>;

    // --- Activities ---
    async fn get_activity(&self, activity_id: i64) -> PortResult<SailingActivity>;

    async fn list_activities(
        &self,
        boat_id: Option<i64>,
        page: &PaginationParams,
    ) -> PortResult<Page<SailingActivity>>;

    /// Fails with `NotFound` when `activity.boat_id` does not reference a boat.
    async fn create_activity(&self, activity: NewActivity) -> PortResult<SailingActivity>;

    async fn update_activity(
        &self,
        activity_id: i64,
        activity: NewActivity,
    ) -> PortResult<SailingActivity>;

    async fn delete_activity(&self, activity_id: i64) -> PortResult<()>;

    // --- Reporting ---
    /// Every activity (optionally for one boat) joined with its boat profile.
    async fn list_report_activities(&self, boat_id: Option<i64>) -> PortResult<Vec<ReportActivity>>;
}
