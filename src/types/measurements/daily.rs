use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily summary from `/quotidien/`. Computed by the remote service, never
/// derived locally from hourly records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMeasurement {
    pub id: i64,
    pub station: i64,
    pub station_code: String,
    #[serde(rename = "nom_usuel")]
    pub station_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "alti")]
    pub altitude: f64,
    pub date: NaiveDate,
    #[serde(rename = "rr")]
    pub precipitation: Option<f64>, // total mm
    #[serde(rename = "tn")]
    pub temperature_min: Option<f64>,
    #[serde(rename = "tx")]
    pub temperature_max: Option<f64>,
    #[serde(rename = "tm")]
    pub temperature_mean: Option<f64>,
    #[serde(rename = "ffm")]
    pub wind_speed_mean: Option<f64>,
    #[serde(rename = "fxy")]
    pub wind_gust_max: Option<f64>,
}
