//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sailing_log_core::domain::{
    Boat, BoatProfile, NewActivity, NewBoat, ReportActivity, SailingActivity, UnknownVariant,
};
use sailing_log_core::pagination::PaginationParams;
use sailing_log_core::ports::{DatabaseService, Page, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

//=========================================================================================
// Column Lists and Sorting
//=========================================================================================

const BOAT_COLUMNS: &str = "id, name, boat_type, make, model, year, length_ft, beam_ft, \
     sail_number, home_port, owner, notes, color_hex, created_at, updated_at";

const ACTIVITY_COLUMNS: &str = "id, boat_id, start_time, end_time, departure_location, \
     return_location, distance_nm, avg_speed_knots, wind_speed_knots, wind_direction, \
     weather_conditions, sea_state, sail_configuration, purpose, notes, created_at, updated_at";

/// Maps an allow-listed wire sort field to its column. Anything else sorts by id.
fn boat_sort_column(field: &str) -> &'static str {
    match field {
        "name" => "name",
        "lengthFt" => "length_ft",
        "year" => "year",
        "createdAt" => "created_at",
        _ => "id",
    }
}

fn activity_sort_column(field: &str) -> &'static str {
    match field {
        "startTime" => "start_time",
        "endTime" => "end_time",
        "distanceNm" => "distance_nm",
        "createdAt" => "created_at",
        _ => "id",
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn parse_column<T>(raw: Option<String>) -> PortResult<Option<T>>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.map(|s| s.parse::<T>())
        .transpose()
        .map_err(|e| PortError::Unexpected(format!("Corrupt row: {}", e)))
}

#[derive(FromRow)]
struct BoatRecord {
    id: i64,
    name: String,
    boat_type: Option<String>,
    make: Option<String>,
    model: Option<String>,
    year: Option<i32>,
    length_ft: f64,
    beam_ft: Option<f64>,
    sail_number: Option<String>,
    home_port: Option<String>,
    owner: Option<String>,
    notes: Option<String>,
    color_hex: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl BoatRecord {
    fn to_domain(self) -> PortResult<Boat> {
        Ok(Boat {
            id: self.id,
            name: self.name,
            boat_type: parse_column(self.boat_type)?,
            make: self.make,
            model: self.model,
            year: self.year,
            length_ft: self.length_ft,
            beam_ft: self.beam_ft,
            sail_number: self.sail_number,
            home_port: self.home_port,
            owner: self.owner,
            notes: self.notes,
            color_hex: self.color_hex,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ActivityRecord {
    id: i64,
    boat_id: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    departure_location: Option<String>,
    return_location: Option<String>,
    distance_nm: Option<f64>,
    avg_speed_knots: Option<f64>,
    wind_speed_knots: Option<f64>,
    wind_direction: Option<String>,
    weather_conditions: Option<String>,
    sea_state: Option<String>,
    sail_configuration: Option<String>,
    purpose: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl ActivityRecord {
    fn to_domain(self) -> PortResult<SailingActivity> {
        Ok(SailingActivity {
            id: self.id,
            boat_id: self.boat_id,
            start_time: self.start_time,
            end_time: self.end_time,
            departure_location: self.departure_location,
            return_location: self.return_location,
            distance_nm: self.distance_nm,
            avg_speed_knots: self.avg_speed_knots,
            wind_speed_knots: self.wind_speed_knots,
            wind_direction: parse_column(self.wind_direction)?,
            weather_conditions: parse_column(self.weather_conditions)?,
            sea_state: parse_column(self.sea_state)?,
            sail_configuration: self.sail_configuration,
            purpose: parse_column(self.purpose)?,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// An activity joined with the boat columns reports group on.
#[derive(FromRow)]
struct ReportActivityRecord {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    distance_nm: Option<f64>,
    purpose: Option<String>,
    boat_id: i64,
    boat_type: Option<String>,
    length_ft: f64,
}
impl ReportActivityRecord {
    // Unreadable enum values group under "Unknown" rather than failing the report.
    fn to_domain(self) -> ReportActivity {
        ReportActivity {
            start_time: Some(self.start_time),
            end_time: Some(self.end_time),
            distance_nm: self.distance_nm,
            purpose: self.purpose.and_then(|p| p.parse().ok()),
            boat: Some(BoatProfile {
                id: self.boat_id,
                boat_type: self.boat_type.and_then(|t| t.parse().ok()),
                length_ft: Some(self.length_ft),
            }),
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn get_boat(&self, boat_id: i64) -> PortResult<Boat> {
        let sql = format!("SELECT {} FROM boats WHERE id = $1", BOAT_COLUMNS);
        let record = sqlx::query_as::<_, BoatRecord>(&sql)
            .bind(boat_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("Boat {} not found", boat_id)))?;
        record.to_domain()
    }

    async fn list_boats(&self, page: &PaginationParams) -> PortResult<Page<Boat>> {
        let sql = format!(
            "SELECT {} FROM boats ORDER BY {} {}, id {} LIMIT $1 OFFSET $2",
            BOAT_COLUMNS,
            boat_sort_column(&page.sort_by),
            page.sort_order.as_sql(),
            page.sort_order.as_sql(),
        );
        let records = sqlx::query_as::<_, BoatRecord>(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boats")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        let items = records
            .into_iter()
            .map(|r| r.to_domain())
            .collect::<PortResult<Vec<_>>>()?;
        Ok(Page { items, total })
    }

    async fn create_boat(&self, boat: NewBoat) -> PortResult<Boat> {
        let sql = format!(
            "INSERT INTO boats (name, boat_type, make, model, year, length_ft, beam_ft, \
             sail_number, home_port, owner, notes, color_hex) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING {}",
            BOAT_COLUMNS
        );
        let record = sqlx::query_as::<_, BoatRecord>(&sql)
            .bind(boat.name.trim())
            .bind(boat.boat_type.map(|t| t.as_str()))
            .bind(boat.make)
            .bind(boat.model)
            .bind(boat.year)
            .bind(boat.length_ft)
            .bind(boat.beam_ft)
            .bind(boat.sail_number)
            .bind(boat.home_port)
            .bind(boat.owner)
            .bind(boat.notes)
            .bind(boat.color_hex)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        record.to_domain()
    }

    async fn update_boat(&self, boat_id: i64, boat: NewBoat) -> PortResult<Boat> {
        let sql = format!(
            "UPDATE boats SET name = $1, boat_type = $2, make = $3, model = $4, year = $5, \
             length_ft = $6, beam_ft = $7, sail_number = $8, home_port = $9, owner = $10, \
             notes = $11, color_hex = $12, updated_at = NOW() \
             WHERE id = $13 RETURNING {}",
            BOAT_COLUMNS
        );
        let record = sqlx::query_as::<_, BoatRecord>(&sql)
            .bind(boat.name.trim())
            .bind(boat.boat_type.map(|t| t.as_str()))
            .bind(boat.make)
            .bind(boat.model)
            .bind(boat.year)
            .bind(boat.length_ft)
            .bind(boat.beam_ft)
            .bind(boat.sail_number)
            .bind(boat.home_port)
            .bind(boat.owner)
            .bind(boat.notes)
            .bind(boat.color_hex)
            .bind(boat_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("Boat {} not found", boat_id)))?;
        record.to_domain()
    }

    async fn delete_boat(&self, boat_id: i64) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM boats WHERE id = $1")
            .bind(boat_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Boat {} not found", boat_id)));
        }
        Ok(())
    }

    async fn get_activity(&self, activity_id: i64) -> PortResult<SailingActivity> {
        let sql = format!("SELECT {} FROM sailing_activities WHERE id = $1", ACTIVITY_COLUMNS);
        let record = sqlx::query_as::<_, ActivityRecord>(&sql)
            .bind(activity_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("Activity {} not found", activity_id)))?;
        record.to_domain()
    }

    async fn list_activities(
        &self,
        boat_id: Option<i64>,
        page: &PaginationParams,
    ) -> PortResult<Page<SailingActivity>> {
        let sql = format!(
            "SELECT {} FROM sailing_activities \
             WHERE ($1::BIGINT IS NULL OR boat_id = $1) \
             ORDER BY {} {}, id {} LIMIT $2 OFFSET $3",
            ACTIVITY_COLUMNS,
            activity_sort_column(&page.sort_by),
            page.sort_order.as_sql(),
            page.sort_order.as_sql(),
        );
        let records = sqlx::query_as::<_, ActivityRecord>(&sql)
            .bind(boat_id)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sailing_activities WHERE ($1::BIGINT IS NULL OR boat_id = $1)",
        )
        .bind(boat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        let items = records
            .into_iter()
            .map(|r| r.to_domain())
            .collect::<PortResult<Vec<_>>>()?;
        Ok(Page { items, total })
    }

    async fn create_activity(&self, activity: NewActivity) -> PortResult<SailingActivity> {
        let boat_id = activity.boat_id;
        let sql = format!(
            "INSERT INTO sailing_activities (boat_id, start_time, end_time, departure_location, \
             return_location, distance_nm, avg_speed_knots, wind_speed_knots, wind_direction, \
             weather_conditions, sea_state, sail_configuration, purpose, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING {}",
            ACTIVITY_COLUMNS
        );
        let record = sqlx::query_as::<_, ActivityRecord>(&sql)
            .bind(activity.boat_id)
            .bind(activity.start_time)
            .bind(activity.end_time)
            .bind(activity.departure_location)
            .bind(activity.return_location)
            .bind(activity.distance_nm)
            .bind(activity.avg_speed_knots)
            .bind(activity.wind_speed_knots)
            .bind(activity.wind_direction.map(|w| w.as_str()))
            .bind(activity.weather_conditions.map(|w| w.as_str()))
            .bind(activity.sea_state.map(|s| s.as_str()))
            .bind(activity.sail_configuration)
            .bind(activity.purpose.map(|p| p.as_str()))
            .bind(activity.notes)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| missing_boat_or_unexpected(e, boat_id))?;
        record.to_domain()
    }

    async fn update_activity(
        &self,
        activity_id: i64,
        activity: NewActivity,
    ) -> PortResult<SailingActivity> {
        let boat_id = activity.boat_id;
        let sql = format!(
            "UPDATE sailing_activities SET boat_id = $1, start_time = $2, end_time = $3, \
             departure_location = $4, return_location = $5, distance_nm = $6, \
             avg_speed_knots = $7, wind_speed_knots = $8, wind_direction = $9, \
             weather_conditions = $10, sea_state = $11, sail_configuration = $12, \
             purpose = $13, notes = $14, updated_at = NOW() \
             WHERE id = $15 RETURNING {}",
            ACTIVITY_COLUMNS
        );
        let record = sqlx::query_as::<_, ActivityRecord>(&sql)
            .bind(activity.boat_id)
            .bind(activity.start_time)
            .bind(activity.end_time)
            .bind(activity.departure_location)
            .bind(activity.return_location)
            .bind(activity.distance_nm)
            .bind(activity.avg_speed_knots)
            .bind(activity.wind_speed_knots)
            .bind(activity.wind_direction.map(|w| w.as_str()))
            .bind(activity.weather_conditions.map(|w| w.as_str()))
            .bind(activity.sea_state.map(|s| s.as_str()))
            .bind(activity.sail_configuration)
            .bind(activity.purpose.map(|p| p.as_str()))
            .bind(activity.notes)
            .bind(activity_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| missing_boat_or_unexpected(e, boat_id))?
            .ok_or_else(|| PortError::NotFound(format!("Activity {} not found", activity_id)))?;
        record.to_domain()
    }

    async fn delete_activity(&self, activity_id: i64) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM sailing_activities WHERE id = $1")
            .bind(activity_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Activity {} not found", activity_id)));
        }
        Ok(())
    }

    async fn list_report_activities(
        &self,
        boat_id: Option<i64>,
    ) -> PortResult<Vec<ReportActivity>> {
        let records = sqlx::query_as::<_, ReportActivityRecord>(
            "SELECT a.start_time, a.end_time, a.distance_nm, a.purpose, \
             b.id AS boat_id, b.boat_type, b.length_ft \
             FROM sailing_activities a JOIN boats b ON b.id = a.boat_id \
             WHERE ($1::BIGINT IS NULL OR a.boat_id = $1) \
             ORDER BY a.start_time ASC, a.id ASC",
        )
        .bind(boat_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }
}

/// The `boat_id` foreign key is the store's check that the boat exists.
fn missing_boat_or_unexpected(e: sqlx::Error, boat_id: i64) -> PortError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_foreign_key_violation() => {
            PortError::NotFound(format!("Boat {} not found", boat_id))
        }
        _ => unexpected(e),
    }
}
