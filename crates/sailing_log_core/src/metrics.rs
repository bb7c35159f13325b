//! crates/sailing_log_core/src/metrics.rs
//!
//! Reduces activity records into summary metrics (hours sailed, nautical miles,
//! event count), either in total or grouped by a derived label.
//!
//! Nothing here fails. A record missing a timestamp adds no hours, a record
//! missing a distance adds no miles, and both still count as an event.

use chrono::Datelike;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::ReportActivity;

/// Label used when the field a group is derived from is absent.
pub const UNKNOWN_GROUP: &str = "Unknown";

const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    pub hours_sailed: f64,
    pub nautical_miles: f64,
    pub event_count: u64,
}

impl ReportMetrics {
    fn add(&mut self, activity: &ReportActivity) {
        self.hours_sailed += duration_hours(activity);
        self.nautical_miles += activity.distance_nm.unwrap_or(0.0);
        self.event_count += 1;
    }
}

/// Wall-clock elapsed hours, so a multi-day trip counts every hour it spans.
fn duration_hours(activity: &ReportActivity) -> f64 {
    match (activity.start_time, activity.end_time) {
        (Some(start), Some(end)) => (end - start).num_milliseconds() as f64 / MS_PER_HOUR,
        _ => 0.0,
    }
}

pub fn calculate_total_metrics(activities: &[ReportActivity]) -> ReportMetrics {
    let mut total = ReportMetrics::default();
    for activity in activities {
        total.add(activity);
    }
    total
}

/// Metrics per group label, in the order each label first appeared.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedMetrics {
    groups: Vec<(String, ReportMetrics)>,
}

impl GroupedMetrics {
    pub fn get(&self, label: &str) -> Option<&ReportMetrics> {
        self.groups
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, metrics)| metrics)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportMetrics)> {
        self.groups.iter().map(|(key, metrics)| (key.as_str(), metrics))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn entry(&mut self, label: String) -> &mut ReportMetrics {
        // Group counts stay small, so a linear scan is fine here.
        let index = match self.groups.iter().position(|(key, _)| *key == label) {
            Some(index) => index,
            None => {
                self.groups.push((label, ReportMetrics::default()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }
}

impl Serialize for GroupedMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, metrics) in &self.groups {
            map.serialize_entry(key, metrics)?;
        }
        map.end()
    }
}

pub fn group_activities_by_field<F>(activities: &[ReportActivity], key_fn: F) -> GroupedMetrics
where
    F: Fn(&ReportActivity) -> String,
{
    let mut grouped = GroupedMetrics::default();
    for activity in activities {
        grouped.entry(key_fn(activity)).add(activity);
    }
    grouped
}

//=========================================================================================
// Fixed Groupings
//=========================================================================================

pub fn boat_type_label(activity: &ReportActivity) -> String {
    activity
        .boat
        .and_then(|boat| boat.boat_type)
        .map_or_else(|| UNKNOWN_GROUP.to_string(), |t| t.as_str().to_string())
}

pub fn purpose_label(activity: &ReportActivity) -> String {
    activity
        .purpose
        .map_or_else(|| UNKNOWN_GROUP.to_string(), |p| p.as_str().to_string())
}

/// Ten-foot bucket label, e.g. 34ft lands in `"30-39ft"`.
///
/// The bucket math stays in `f64` so any finite length yields a label.
pub fn length_bucket_label(length_ft: Option<f64>) -> String {
    match length_ft {
        Some(length) if length.is_finite() => {
            // `+ 0.0` turns a negative zero into zero.
            let bucket = (length / 10.0).floor() * 10.0 + 0.0;
            format!("{:.0}-{:.0}ft", bucket, bucket + 9.0)
        }
        _ => UNKNOWN_GROUP.to_string(),
    }
}

pub fn month_label(activity: &ReportActivity) -> String {
    activity.start_time.map_or_else(
        || UNKNOWN_GROUP.to_string(),
        |start| format!("{:04}-{:02}", start.year(), start.month()),
    )
}

pub fn year_label(activity: &ReportActivity) -> String {
    activity.start_time.map_or_else(
        || UNKNOWN_GROUP.to_string(),
        |start| format!("{:04}", start.year()),
    )
}

pub fn group_by_boat_type(activities: &[ReportActivity]) -> GroupedMetrics {
    group_activities_by_field(activities, boat_type_label)
}

pub fn group_by_purpose(activities: &[ReportActivity]) -> GroupedMetrics {
    group_activities_by_field(activities, purpose_label)
}

pub fn group_by_boat_length(activities: &[ReportActivity]) -> GroupedMetrics {
    group_activities_by_field(activities, |a| {
        length_bucket_label(a.boat.and_then(|boat| boat.length_ft))
    })
}

pub fn group_by_month(activities: &[ReportActivity]) -> GroupedMetrics {
    group_activities_by_field(activities, month_label)
}

pub fn group_by_year(activities: &[ReportActivity]) -> GroupedMetrics {
    group_activities_by_field(activities, year_label)
}
