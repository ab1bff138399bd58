use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hourly observation from `/horaire/`.
///
/// Every reading is independently optional: `None` means the sensor did not report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyMeasurement {
    pub id: i64,
    pub station: i64,
    pub station_code: String,
    pub lat: f64,
    pub lon: f64,
    pub validity_time: DateTime<Utc>,
    #[serde(rename = "t")]
    pub temperature: Option<f64>, // °C
    #[serde(rename = "td")]
    pub dew_point: Option<f64>, // °C
    #[serde(rename = "tx")]
    pub temperature_max: Option<f64>,
    #[serde(rename = "tn")]
    pub temperature_min: Option<f64>,
    #[serde(rename = "u")]
    pub humidity: Option<f64>, // %
    #[serde(rename = "dd")]
    pub wind_direction: Option<f64>, // degrees
    #[serde(rename = "ff")]
    pub wind_speed: Option<f64>, // m/s
    #[serde(rename = "rr1")]
    pub precipitation: Option<f64>, // mm over the hour
    #[serde(rename = "vv")]
    pub visibility: Option<f64>, // m
    #[serde(rename = "n")]
    pub cloud_cover: Option<f64>, // octas
    #[serde(rename = "pres")]
    pub pressure: Option<f64>, // hPa, station level
    #[serde(rename = "pmer")]
    pub sea_level_pressure: Option<f64>, // hPa
}
