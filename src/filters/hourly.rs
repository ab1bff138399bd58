use crate::filters::{SortBy, SortField};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Attributes `/horaire/` can be ordered by. The remote default is `-validity_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourlySort {
    ValidityTime,
    Temperature,
    Precipitation,
}

impl SortField for HourlySort {
    fn as_param(&self) -> &'static str {
        match self {
            HourlySort::ValidityTime => "validity_time",
            HourlySort::Temperature => "t",
            HourlySort::Precipitation => "rr1",
        }
    }
}

/// Query parameters accepted by `/horaire/`.
///
/// Time bounds are inclusive and serialized as RFC 3339 timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
pub struct HourlyFilters {
    /// Numeric station id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<i64>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_time_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_time_before: Option<DateTime<Utc>>,
    #[serde(
        rename = "t_min",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::finite"
    )]
    pub temperature_min: Option<f64>,
    #[serde(
        rename = "t_max",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::finite"
    )]
    pub temperature_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<SortBy<HourlySort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl HourlyFilters {
    pub fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }
}
