//! In-memory `DatabaseService` used to drive the handlers without Postgres.

#![allow(dead_code)]

use api_lib::config::Config;
use api_lib::web::state::AppState;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sailing_log_core::domain::{
    Boat, BoatProfile, BoatType, NewActivity, NewBoat, Purpose, ReportActivity, SailingActivity,
};
use sailing_log_core::pagination::{PaginationParams, SortOrder};
use sailing_log_core::ports::{DatabaseService, Page, PortError, PortResult};
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use tracing::Level;

#[derive(Default)]
struct Tables {
    boats: Vec<Boat>,
    activities: Vec<SailingActivity>,
    next_boat_id: i64,
    next_activity_id: i64,
}

#[derive(Default)]
pub struct InMemoryDb {
    tables: Mutex<Tables>,
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn page_of<T: Clone>(
    mut rows: Vec<T>,
    page: &PaginationParams,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Page<T> {
    rows.sort_by(|a, b| match page.sort_order {
        SortOrder::Asc => cmp(a, b),
        SortOrder::Desc => cmp(b, a),
    });
    let total = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .collect();
    Page { items, total }
}

fn boat_from(id: i64, boat: NewBoat, created_at: DateTime<Utc>) -> Boat {
    Boat {
        id,
        name: boat.name.trim().to_string(),
        boat_type: boat.boat_type,
        make: boat.make,
        model: boat.model,
        year: boat.year,
        length_ft: boat.length_ft,
        beam_ft: boat.beam_ft,
        sail_number: boat.sail_number,
        home_port: boat.home_port,
        owner: boat.owner,
        notes: boat.notes,
        color_hex: boat.color_hex,
        created_at,
        updated_at: now(),
    }
}

fn activity_from(id: i64, a: NewActivity, created_at: DateTime<Utc>) -> SailingActivity {
    SailingActivity {
        id,
        boat_id: a.boat_id,
        start_time: a.start_time,
        end_time: a.end_time,
        departure_location: a.departure_location,
        return_location: a.return_location,
        distance_nm: a.distance_nm,
        avg_speed_knots: a.avg_speed_knots,
        wind_speed_knots: a.wind_speed_knots,
        wind_direction: a.wind_direction,
        weather_conditions: a.weather_conditions,
        sea_state: a.sea_state,
        sail_configuration: a.sail_configuration,
        purpose: a.purpose,
        notes: a.notes,
        created_at,
        updated_at: now(),
    }
}

/// The joined row the Postgres adapter hands to the reports.
fn report_row(activity: &SailingActivity, boat: Option<&Boat>) -> ReportActivity {
    ReportActivity {
        start_time: Some(activity.start_time),
        end_time: Some(activity.end_time),
        distance_nm: activity.distance_nm,
        purpose: activity.purpose,
        boat: boat.map(|b| BoatProfile {
            id: b.id,
            boat_type: b.boat_type,
            length_ft: Some(b.length_ft),
        }),
    }
}

#[async_trait]
impl DatabaseService for InMemoryDb {
    async fn get_boat(&self, boat_id: i64) -> PortResult<Boat> {
        let tables = self.tables.lock().unwrap();
        tables
            .boats
            .iter()
            .find(|b| b.id == boat_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Boat {} not found", boat_id)))
    }

    async fn list_boats(&self, page: &PaginationParams) -> PortResult<Page<Boat>> {
        let rows = self.tables.lock().unwrap().boats.clone();
        Ok(match page.sort_by.as_str() {
            "name" => page_of(rows, page, |a, b| a.name.cmp(&b.name)),
            "lengthFt" => page_of(rows, page, |a, b| a.length_ft.total_cmp(&b.length_ft)),
            _ => page_of(rows, page, |a, b| a.id.cmp(&b.id)),
        })
    }

    async fn create_boat(&self, boat: NewBoat) -> PortResult<Boat> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_boat_id += 1;
        let boat = boat_from(tables.next_boat_id, boat, now());
        tables.boats.push(boat.clone());
        Ok(boat)
    }

    async fn update_boat(&self, boat_id: i64, boat: NewBoat) -> PortResult<Boat> {
        let mut tables = self.tables.lock().unwrap();
        let slot = tables
            .boats
            .iter_mut()
            .find(|b| b.id == boat_id)
            .ok_or_else(|| PortError::NotFound(format!("Boat {} not found", boat_id)))?;
        *slot = boat_from(boat_id, boat, slot.created_at);
        Ok(slot.clone())
    }

    async fn delete_boat(&self, boat_id: i64) -> PortResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.boats.len();
        tables.boats.retain(|b| b.id != boat_id);
        if tables.boats.len() == before {
            return Err(PortError::NotFound(format!("Boat {} not found", boat_id)));
        }
        tables.activities.retain(|a| a.boat_id != boat_id);
        Ok(())
    }

    async fn get_activity(&self, activity_id: i64) -> PortResult<SailingActivity> {
        let tables = self.tables.lock().unwrap();
        tables
            .activities
            .iter()
            .find(|a| a.id == activity_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Activity {} not found", activity_id)))
    }

    async fn list_activities(
        &self,
        boat_id: Option<i64>,
        page: &PaginationParams,
    ) -> PortResult<Page<SailingActivity>> {
        let rows: Vec<_> = self
            .tables
            .lock()
            .unwrap()
            .activities
            .iter()
            .filter(|a| boat_id.map_or(true, |id| a.boat_id == id))
            .cloned()
            .collect();
        Ok(match page.sort_by.as_str() {
            "startTime" => page_of(rows, page, |a, b| a.start_time.cmp(&b.start_time)),
            _ => page_of(rows, page, |a, b| a.id.cmp(&b.id)),
        })
    }

    async fn create_activity(&self, activity: NewActivity) -> PortResult<SailingActivity> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.boats.iter().any(|b| b.id == activity.boat_id) {
            return Err(PortError::NotFound(format!("Boat {} not found", activity.boat_id)));
        }
        tables.next_activity_id += 1;
        let activity = activity_from(tables.next_activity_id, activity, now());
        tables.activities.push(activity.clone());
        Ok(activity)
    }

    async fn update_activity(
        &self,
        activity_id: i64,
        activity: NewActivity,
    ) -> PortResult<SailingActivity> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.boats.iter().any(|b| b.id == activity.boat_id) {
            return Err(PortError::NotFound(format!("Boat {} not found", activity.boat_id)));
        }
        let slot = tables
            .activities
            .iter_mut()
            .find(|a| a.id == activity_id)
            .ok_or_else(|| PortError::NotFound(format!("Activity {} not found", activity_id)))?;
        *slot = activity_from(activity_id, activity, slot.created_at);
        Ok(slot.clone())
    }

    async fn delete_activity(&self, activity_id: i64) -> PortResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.activities.len();
        tables.activities.retain(|a| a.id != activity_id);
        if tables.activities.len() == before {
            return Err(PortError::NotFound(format!("Activity {} not found", activity_id)));
        }
        Ok(())
    }

    async fn list_report_activities(
        &self,
        boat_id: Option<i64>,
    ) -> PortResult<Vec<ReportActivity>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .activities
            .iter()
            .filter(|a| boat_id.map_or(true, |id| a.boat_id == id))
            .map(|a| {
                let boat = tables.boats.iter().find(|b| b.id == a.boat_id);
                report_row(a, boat)
            })
            .collect())
    }
}

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://unused".to_string(),
        log_level: Level::INFO,
        db_max_connections: 1,
        cors_origin: "http://localhost:3000".to_string(),
        admin_token_hash: None,
    }
}

pub fn app_state() -> Arc<AppState> {
    app_state_with_token_hash(None)
}

pub fn app_state_with_token_hash(admin_token_hash: Option<String>) -> Arc<AppState> {
    Arc::new(AppState {
        db: Arc::new(InMemoryDb::default()),
        config: Arc::new(Config {
            admin_token_hash,
            ..test_config()
        }),
    })
}

pub fn new_boat(name: &str, boat_type: Option<BoatType>, length_ft: f64) -> NewBoat {
    NewBoat {
        name: name.to_string(),
        boat_type,
        make: None,
        model: None,
        year: None,
        length_ft,
        beam_ft: None,
        sail_number: None,
        home_port: None,
        owner: None,
        notes: None,
        color_hex: None,
    }
}

/// A trip starting at `start` and lasting `hours`.
pub fn new_activity(
    boat_id: i64,
    start: DateTime<Utc>,
    hours: i64,
    distance_nm: Option<f64>,
    purpose: Option<Purpose>,
) -> NewActivity {
    NewActivity {
        boat_id,
        start_time: start,
        end_time: start + Duration::hours(hours),
        departure_location: Some("Annapolis".to_string()),
        return_location: Some("Annapolis".to_string()),
        distance_nm,
        avg_speed_knots: None,
        wind_speed_knots: None,
        wind_direction: None,
        weather_conditions: None,
        sea_state: None,
        sail_configuration: None,
        purpose,
        notes: None,
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}
