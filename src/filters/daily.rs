use crate::filters::{SortBy, SortField};
use bon::Builder;
use chrono::NaiveDate;
use serde::Serialize;

/// Attributes `/quotidien/` can be ordered by. The remote default is `-date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DailySort {
    Date,
    TemperatureMin,
    TemperatureMax,
    Precipitation,
}

impl SortField for DailySort {
    fn as_param(&self) -> &'static str {
        match self {
            DailySort::Date => "date",
            DailySort::TemperatureMin => "tn",
            DailySort::TemperatureMax => "tx",
            DailySort::Precipitation => "rr",
        }
    }
}

/// Query parameters accepted by `/quotidien/`. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
pub struct DailyFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<i64>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_after: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_before: Option<NaiveDate>,
    /// Lower bound on the daily minimum temperature (`tn`).
    #[serde(
        rename = "tn_min",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::finite"
    )]
    pub temperature_min_from: Option<f64>,
    /// Upper bound on the daily maximum temperature (`tx`).
    #[serde(
        rename = "tx_max",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::finite"
    )]
    pub temperature_max_to: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<SortBy<DailySort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl DailyFilters {
    pub fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::QueryParams;

    #[test]
    fn test_date_window_serializes_as_iso_dates() {
        let filters = DailyFilters::builder()
            .station(12)
            .date_after(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
            .date_before(NaiveDate::from_ymd_opt(2024, 7, 31).unwrap())
            .temperature_max_to(35.0)
            .ordering(SortBy::asc(DailySort::Date))
            .build();
        let pairs = filters.to_query_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("date_after".to_string(), "2024-07-01".to_string()),
                ("date_before".to_string(), "2024-07-31".to_string()),
                ("ordering".to_string(), "date".to_string()),
                ("station".to_string(), "12".to_string()),
                ("tx_max".to_string(), "35.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_is_unfiltered() {
        assert!(DailyFilters::default().to_query_pairs().unwrap().is_empty());
    }
}
