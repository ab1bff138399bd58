//! Observation stations as exposed by `/stations/` and `/stations/{id}/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed observation point reporting measurements.
///
/// Field names follow Rust conventions; the serde renames map them onto the
/// remote service's attribute names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    /// Natural key, unique across all stations (e.g. "75114001").
    pub code: String,
    #[serde(rename = "nom")]
    pub name: String,
    /// Administrative region (département) number.
    #[serde(rename = "departement")]
    pub department: i32,
    /// Reporting cadence class.
    #[serde(rename = "frequence")]
    pub frequency: String,
    #[serde(rename = "poste_ouvert")]
    pub is_open: bool,
    #[serde(rename = "type_poste")]
    pub station_type: i32,
    pub lon: f64,
    pub lat: f64,
    /// Altitude in meters.
    pub alt: f64,
    #[serde(rename = "poste_public")]
    pub is_public: bool,
}

/// Geographical position of a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Location {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl Station {
    pub fn location(&self) -> Location {
        Location {
            latitude: self.lat,
            longitude: self.lon,
            altitude: self.alt,
        }
    }
}

/// A station with its bookkeeping timestamps, returned by the single-entity endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDetail {
    #[serde(flatten)]
    pub station: Station,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How a single station is addressed: by numeric id or by code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StationId {
    Id(i64),
    Code(String),
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationId::Id(id) => write!(f, "{id}"),
            StationId::Code(code) => f.write_str(code),
        }
    }
}

impl From<i64> for StationId {
    fn from(id: i64) -> Self {
        StationId::Id(id)
    }
}

impl From<&str> for StationId {
    fn from(code: &str) -> Self {
        StationId::Code(code.to_string())
    }
}

impl From<String> for StationId {
    fn from(code: String) -> Self {
        StationId::Code(code)
    }
}
