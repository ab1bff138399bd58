//! Request and response types for the national temperature indicator.
//!
//! The indicator is a daily, monthly or yearly temperature series for the whole
//! territory, each point carrying the baseline band it is compared against.

use crate::api::error::ValidationError;
use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Temporal resolution of the indicator points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Year,
    Month,
    Day,
}

/// Calendar restriction applied before aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceType {
    #[default]
    Full,
    /// Only days of a given month, across all years. Requires `month_of_year`.
    MonthOfYear,
    /// One given day per period. Requires `day_of_month`.
    DayOfMonth,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Day => "day",
        })
    }
}

impl fmt::Display for SliceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SliceType::Full => "full",
            SliceType::MonthOfYear => "month_of_year",
            SliceType::DayOfMonth => "day_of_month",
        })
    }
}

/// Query parameters of `/temperature/national-indicator`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use infoclimat::{Granularity, NationalIndicatorParams, SliceType};
///
/// let params = NationalIndicatorParams::builder()
///     .date_start(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
///     .date_end(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
///     .granularity(Granularity::Year)
///     .slice_type(SliceType::MonthOfYear)
///     .build();
///
/// // month_of_year is missing
/// let err = params.validate().unwrap_err();
/// assert!(err.has_field("month_of_year"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
pub struct NationalIndicatorParams {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub granularity: Granularity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice_type: Option<SliceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

impl NationalIndicatorParams {
    pub fn effective_slice_type(&self) -> SliceType {
        self.slice_type.unwrap_or_default()
    }

    /// Checks the granularity/slice combination rules.
    ///
    /// All violations are reported at once, keyed by the field at fault.
    /// `date_start <= date_end` is not checked here; the remote service owns it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new("Invalid or missing parameter");

        if let Some(month) = self.month_of_year {
            if !(1..=12).contains(&month) {
                err.add_field_error("month_of_year", "Must be between 1 and 12.");
            }
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                err.add_field_error("day_of_month", "Must be between 1 and 31.");
            }
        }

        let slice_type = self.effective_slice_type();

        if self.granularity == Granularity::Day {
            if slice_type != SliceType::Full {
                err.add_field_error("slice_type", "Must be 'full' when granularity is 'day'.");
            }
            if self.month_of_year.is_some() {
                err.add_field_error("month_of_year", "Not allowed when granularity is 'day'.");
            }
            if self.day_of_month.is_some() {
                err.add_field_error("day_of_month", "Not allowed when granularity is 'day'.");
            }
        }

        match slice_type {
            SliceType::Full => {
                if self.granularity != Granularity::Day {
                    if self.month_of_year.is_some() {
                        err.add_field_error("month_of_year", "Not allowed when slice_type is 'full'.");
                    }
                    if self.day_of_month.is_some() {
                        err.add_field_error("day_of_month", "Not allowed when slice_type is 'full'.");
                    }
                }
            }
            SliceType::MonthOfYear => {
                if self.granularity != Granularity::Year {
                    if self.granularity != Granularity::Day {
                        err.add_field_error(
                            "slice_type",
                            "'month_of_year' requires granularity 'year'.",
                        );
                    }
                } else {
                    if self.month_of_year.is_none() {
                        err.add_field_error(
                            "month_of_year",
                            "Required when slice_type is 'month_of_year'.",
                        );
                    }
                    if self.day_of_month.is_some() {
                        err.add_field_error(
                            "day_of_month",
                            "Not allowed when slice_type is 'month_of_year'.",
                        );
                    }
                }
            }
            SliceType::DayOfMonth => {
                if self.day_of_month.is_none() {
                    err.add_field_error("day_of_month", "Required when slice_type is 'day_of_month'.");
                }
                match self.granularity {
                    Granularity::Year if self.month_of_year.is_none() => {
                        err.add_field_error(
                            "month_of_year",
                            "Required when slice_type is 'day_of_month' and granularity is 'year'.",
                        );
                    }
                    Granularity::Month if self.month_of_year.is_some() => {
                        err.add_field_error(
                            "month_of_year",
                            "Not allowed when slice_type is 'day_of_month' and granularity is 'month'.",
                        );
                    }
                    _ => {}
                }
            }
        }

        if err.is_empty() {
            Ok(())
        } else {
            Err(err)
        }
    }
}

/// Describes which series the response holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorMetadata {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    /// Reference period of the climatology, e.g. "1991-2020".
    pub baseline: String,
    pub granularity: Granularity,
    pub slice_type: SliceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

/// One point of the indicator: the observed value and its baseline band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub temperature: f64,
    pub baseline_mean: f64,
    pub baseline_std_dev_upper: f64,
    pub baseline_std_dev_lower: f64,
    pub baseline_max: f64,
    pub baseline_min: f64,
}

impl IndicatorPoint {
    /// `min <= std_dev_lower <= mean <= std_dev_upper <= max`
    pub fn is_band_nested(&self) -> bool {
        self.baseline_min <= self.baseline_std_dev_lower
            && self.baseline_std_dev_lower <= self.baseline_mean
            && self.baseline_mean <= self.baseline_std_dev_upper
            && self.baseline_std_dev_upper <= self.baseline_max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalIndicatorResponse {
    pub metadata: IndicatorMetadata,
    pub time_series: Vec<IndicatorPoint>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesInvariantError {
    #[error("Point {index} ({date}) does not come strictly after {previous}")]
    NotIncreasing {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("Baseline band of point {date} is not nested")]
    BandNotNested { date: NaiveDate },

    #[error("slice_type '{slice_type}' requires month_of_year in 1..=12")]
    MissingMonthOfYear { slice_type: SliceType },

    #[error("slice_type '{slice_type}' requires day_of_month in 1..=31")]
    MissingDayOfMonth { slice_type: SliceType },

    #[error("slice_type 'full' must not carry month_of_year or day_of_month")]
    UnexpectedSliceField,
}

impl IndicatorMetadata {
    pub fn check_slice(&self) -> Result<(), SeriesInvariantError> {
        let month_ok = self.month_of_year.is_some_and(|m| (1..=12).contains(&m));
        let day_ok = self.day_of_month.is_some_and(|d| (1..=31).contains(&d));
        match self.slice_type {
            SliceType::Full if self.month_of_year.is_some() || self.day_of_month.is_some() => {
                Err(SeriesInvariantError::UnexpectedSliceField)
            }
            SliceType::MonthOfYear if !month_ok => Err(SeriesInvariantError::MissingMonthOfYear {
                slice_type: self.slice_type,
            }),
            SliceType::DayOfMonth if !day_ok => Err(SeriesInvariantError::MissingDayOfMonth {
                slice_type: self.slice_type,
            }),
            _ => Ok(()),
        }
    }
}

impl NationalIndicatorResponse {
    /// Checks the series against the shape every indicator response must have:
    /// consistent slice metadata, strictly increasing dates and nested baseline bands.
    pub fn validate(&self) -> Result<(), SeriesInvariantError> {
        self.metadata.check_slice()?;
        for (index, pair) in self.time_series.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(SeriesInvariantError::NotIncreasing {
                    index: index + 1,
                    previous: pair[0].date,
                    date: pair[1].date,
                });
            }
        }
        if let Some(point) = self.time_series.iter().find(|p| !p.is_band_nested()) {
            return Err(SeriesInvariantError::BandNotNested { date: point.date });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::QueryParams;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn params(
        granularity: Granularity,
        slice_type: Option<SliceType>,
        month_of_year: Option<u32>,
        day_of_month: Option<u32>,
    ) -> NationalIndicatorParams {
        NationalIndicatorParams::builder()
            .date_start(date(2020, 1, 1))
            .date_end(date(2024, 12, 31))
            .granularity(granularity)
            .maybe_slice_type(slice_type)
            .maybe_month_of_year(month_of_year)
            .maybe_day_of_month(day_of_month)
            .build()
    }

    fn rejected_field(p: NationalIndicatorParams) -> Vec<String> {
        p.validate().unwrap_err().details.into_keys().collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        for granularity in [Granularity::Year, Granularity::Month, Granularity::Day] {
            let p = params(granularity, None, None, None);
            assert!(p.validate().is_ok(), "{granularity} should be valid");
            assert_eq!(p.effective_slice_type(), SliceType::Full);
        }
    }

    #[test]
    fn test_month_of_year_slice_requires_month() {
        let fields = rejected_field(params(
            Granularity::Year,
            Some(SliceType::MonthOfYear),
            None,
            None,
        ));
        assert_eq!(fields, vec!["month_of_year"]);
    }

    #[test]
    fn test_month_of_year_slice_requires_year_granularity() {
        let fields = rejected_field(params(
            Granularity::Month,
            Some(SliceType::MonthOfYear),
            Some(1),
            None,
        ));
        assert!(fields.contains(&"slice_type".to_string()));
    }

    #[test]
    fn test_month_of_year_slice_forbids_day() {
        let fields = rejected_field(params(
            Granularity::Year,
            Some(SliceType::MonthOfYear),
            Some(1),
            Some(1),
        ));
        assert_eq!(fields, vec!["day_of_month"]);
    }

    #[test]
    fn test_day_granularity_only_allows_full() {
        let fields = rejected_field(params(
            Granularity::Day,
            Some(SliceType::DayOfMonth),
            None,
            Some(1),
        ));
        assert!(fields.contains(&"slice_type".to_string()));
        assert!(fields.contains(&"day_of_month".to_string()));

        let fields = rejected_field(params(Granularity::Day, None, Some(1), None));
        assert_eq!(fields, vec!["month_of_year"]);
    }

    #[test]
    fn test_full_slice_forbids_sub_fields() {
        let fields = rejected_field(params(
            Granularity::Month,
            Some(SliceType::Full),
            Some(1),
            Some(1),
        ));
        assert_eq!(fields, vec!["day_of_month", "month_of_year"]);
    }

    #[test]
    fn test_day_of_month_slice_rules() {
        assert_eq!(
            rejected_field(params(Granularity::Month, Some(SliceType::DayOfMonth), None, None)),
            vec!["day_of_month"]
        );
        assert_eq!(
            rejected_field(params(Granularity::Year, Some(SliceType::DayOfMonth), None, Some(1))),
            vec!["month_of_year"]
        );
        assert_eq!(
            rejected_field(params(
                Granularity::Month,
                Some(SliceType::DayOfMonth),
                Some(1),
                Some(1)
            )),
            vec!["month_of_year"]
        );
        assert!(params(Granularity::Month, Some(SliceType::DayOfMonth), None, Some(31))
            .validate()
            .is_ok());
        assert!(params(Granularity::Year, Some(SliceType::DayOfMonth), Some(1), Some(1))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_out_of_range_sub_fields() {
        let fields = rejected_field(params(
            Granularity::Year,
            Some(SliceType::MonthOfYear),
            Some(13),
            None,
        ));
        assert_eq!(fields, vec!["month_of_year"]);

        let fields = rejected_field(params(
            Granularity::Month,
            Some(SliceType::DayOfMonth),
            None,
            Some(0),
        ));
        assert_eq!(fields, vec!["day_of_month"]);
    }

    #[test]
    fn test_inverted_dates_are_forwarded() {
        let p = NationalIndicatorParams::builder()
            .date_start(date(2024, 1, 2))
            .date_end(date(2024, 1, 1))
            .granularity(Granularity::Month)
            .build();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_params_query_pairs() {
        let p = params(Granularity::Year, Some(SliceType::MonthOfYear), Some(7), None);
        let pairs = p.to_query_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("date_end".to_string(), "2024-12-31".to_string()),
                ("date_start".to_string(), "2020-01-01".to_string()),
                ("granularity".to_string(), "year".to_string()),
                ("month_of_year".to_string(), "7".to_string()),
                ("slice_type".to_string(), "month_of_year".to_string()),
            ]
        );
    }

    fn point(d: NaiveDate, mean: f64) -> IndicatorPoint {
        IndicatorPoint {
            date: d,
            temperature: mean + 0.4,
            baseline_mean: mean,
            baseline_std_dev_upper: mean + 1.6,
            baseline_std_dev_lower: mean - 1.6,
            baseline_max: mean + 5.8,
            baseline_min: mean - 5.8,
        }
    }

    fn response(points: Vec<IndicatorPoint>) -> NationalIndicatorResponse {
        NationalIndicatorResponse {
            metadata: IndicatorMetadata {
                date_start: date(2024, 1, 1),
                date_end: date(2024, 1, 3),
                baseline: "1991-2020".to_string(),
                granularity: Granularity::Day,
                slice_type: SliceType::Full,
                month_of_year: None,
                day_of_month: None,
            },
            time_series: points,
        }
    }

    #[test]
    fn test_well_formed_series_validates() {
        let r = response(vec![
            point(date(2024, 1, 1), 7.0),
            point(date(2024, 1, 2), 7.1),
            point(date(2024, 1, 3), 7.2),
        ]);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_repeated_date_is_rejected() {
        let r = response(vec![point(date(2024, 1, 1), 7.0), point(date(2024, 1, 1), 7.1)]);
        assert!(matches!(
            r.validate(),
            Err(SeriesInvariantError::NotIncreasing { index: 1, .. })
        ));
    }

    #[test]
    fn test_broken_band_is_rejected() {
        let mut bad = point(date(2024, 1, 2), 7.0);
        bad.baseline_min = bad.baseline_std_dev_lower + 0.1;
        let r = response(vec![point(date(2024, 1, 1), 7.0), bad]);
        assert_eq!(
            r.validate(),
            Err(SeriesInvariantError::BandNotNested {
                date: date(2024, 1, 2)
            })
        );
    }

    #[test]
    fn test_slice_metadata_consistency() {
        let mut r = response(vec![]);
        r.metadata.slice_type = SliceType::MonthOfYear;
        assert!(matches!(
            r.validate(),
            Err(SeriesInvariantError::MissingMonthOfYear { .. })
        ));
        r.metadata.month_of_year = Some(2);
        assert!(r.validate().is_ok());

        r.metadata.slice_type = SliceType::Full;
        assert_eq!(r.validate(), Err(SeriesInvariantError::UnexpectedSliceField));
    }

    #[test]
    fn test_response_deserializes_wire_format() {
        let json = r#"{
            "metadata": {
                "date_start": "2024-01-01", "date_end": "2024-12-31",
                "baseline": "1991-2020", "granularity": "year",
                "slice_type": "month_of_year", "month_of_year": 1
            },
            "time_series": [{
                "date": "2024-01-01", "temperature": 6.12, "baseline_mean": 7.3,
                "baseline_std_dev_upper": 9.4, "baseline_std_dev_lower": 5.2,
                "baseline_max": 13.9, "baseline_min": 0.71
            }]
        }"#;
        let r: NationalIndicatorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.metadata.slice_type, SliceType::MonthOfYear);
        assert_eq!(r.metadata.day_of_month, None);
        assert_eq!(r.time_series.len(), 1);
        assert!(r.validate().is_ok());
    }
}
