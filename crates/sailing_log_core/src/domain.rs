//! crates/sailing_log_core/src/domain.rs
//!
//! Defines the core data structures for the application: boats, sailing
//! activities, the closed string sets they use, and write-payload validation.
//!
//! The enum wire values are the lowercase strings used both in JSON and in the
//! persisted TEXT columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Closed String Sets
//=========================================================================================

/// Returned when a string is not one of an enum's wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(
    /// Hull configuration of a boat.
    BoatType, "boat type" {
        Monohull => "monohull",
        Trimaran => "trimaran",
        Catamaran => "catamaran",
        Racer => "racer",
    }
);

string_enum!(
    WindDirection, "wind direction" {
        N => "n",
        Ne => "ne",
        E => "e",
        Se => "se",
        S => "s",
        Sw => "sw",
        W => "w",
        Nw => "nw",
    }
);

string_enum!(
    WeatherConditions, "weather condition" {
        Sunny => "sunny",
        Cloudy => "cloudy",
        Rainy => "rainy",
        Foggy => "foggy",
        Stormy => "stormy",
        Other => "other",
    }
);

string_enum!(
    SeaState, "sea state" {
        Calm => "calm",
        Light => "light",
        Moderate => "moderate",
        Rough => "rough",
    }
);

string_enum!(
    /// Why the trip was made. Reports call this the activity type.
    Purpose, "purpose" {
        Racing => "racing",
        Cruising => "cruising",
        Training => "training",
        Charter => "charter",
        Delivery => "delivery",
        Other => "other",
    }
);

//=========================================================================================
// Entities
//=========================================================================================

/// A vessel profile that activities reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Boat {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub boat_type: Option<BoatType>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub length_ft: f64,
    pub beam_ft: Option<f64>,
    pub sail_number: Option<String>,
    pub home_port: Option<String>,
    pub owner: Option<String>,
    pub notes: Option<String>,
    pub color_hex: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable fields of a boat, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewBoat {
    pub name: String,
    #[serde(rename = "type", default)]
    pub boat_type: Option<BoatType>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    pub length_ft: f64,
    #[serde(default)]
    pub beam_ft: Option<f64>,
    #[serde(default)]
    pub sail_number: Option<String>,
    #[serde(default)]
    pub home_port: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
}

/// A single logged sailing trip tied to one boat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SailingActivity {
    pub id: i64,
    pub boat_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub departure_location: Option<String>,
    pub return_location: Option<String>,
    pub distance_nm: Option<f64>,
    pub avg_speed_knots: Option<f64>,
    pub wind_speed_knots: Option<f64>,
    pub wind_direction: Option<WindDirection>,
    pub weather_conditions: Option<WeatherConditions>,
    pub sea_state: Option<SeaState>,
    pub sail_configuration: Option<String>,
    pub purpose: Option<Purpose>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable fields of an activity, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub boat_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub departure_location: Option<String>,
    #[serde(default)]
    pub return_location: Option<String>,
    #[serde(default)]
    pub distance_nm: Option<f64>,
    #[serde(default)]
    pub avg_speed_knots: Option<f64>,
    #[serde(default)]
    pub wind_speed_knots: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<WindDirection>,
    #[serde(default)]
    pub weather_conditions: Option<WeatherConditions>,
    #[serde(default)]
    pub sea_state: Option<SeaState>,
    #[serde(default)]
    pub sail_configuration: Option<String>,
    #[serde(default)]
    pub purpose: Option<Purpose>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The slice of a boat that reports group on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoatProfile {
    pub id: i64,
    pub boat_type: Option<BoatType>,
    pub length_ft: Option<f64>,
}

/// An activity-like record fed to the metrics aggregator, optionally joined
/// with its boat. Every field may be absent; absent fields contribute nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportActivity {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub distance_nm: Option<f64>,
    pub purpose: Option<Purpose>,
    pub boat: Option<BoatProfile>,
}

//=========================================================================================
// Validation
//=========================================================================================

/// A single rejected field in a write payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation in one payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Default)]
struct Checker {
    fields: Vec<FieldError>,
}

impl Checker {
    fn check(&mut self, ok: bool, field: &'static str, message: &str) {
        if !ok {
            self.fields.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                fields: self.fields,
            })
        }
    }
}

const MIN_BOAT_YEAR: i32 = 1800;
const MAX_BOAT_YEAR: i32 = 2200;

fn is_color_hex(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn non_negative(value: Option<f64>) -> bool {
    value.map_or(true, |v| v.is_finite() && v >= 0.0)
}

impl NewBoat {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.check(!self.name.trim().is_empty(), "name", "is required");
        c.check(
            self.length_ft.is_finite() && self.length_ft > 0.0,
            "lengthFt",
            "must be greater than 0",
        );
        c.check(
            self.beam_ft.map_or(true, |b| b.is_finite() && b > 0.0),
            "beamFt",
            "must be greater than 0",
        );
        c.check(
            self.year
                .map_or(true, |y| (MIN_BOAT_YEAR..=MAX_BOAT_YEAR).contains(&y)),
            "year",
            "must be between 1800 and 2200",
        );
        c.check(
            self.color_hex.as_deref().map_or(true, is_color_hex),
            "colorHex",
            "must look like #RRGGBB",
        );
        c.finish()
    }
}

impl NewActivity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.check(self.boat_id > 0, "boatId", "must reference a boat");
        c.check(
            self.end_time >= self.start_time,
            "endTime",
            "must not be before startTime",
        );
        c.check(non_negative(self.distance_nm), "distanceNm", "must be 0 or more");
        c.check(
            non_negative(self.avg_speed_knots),
            "avgSpeedKnots",
            "must be 0 or more",
        );
        c.check(
            non_negative(self.wind_speed_knots),
            "windSpeedKnots",
            "must be 0 or more",
        );
        c.finish()
    }
}
