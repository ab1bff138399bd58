//! Seasonal model for the synthetic indicator series.
//!
//! For day index `i` counted from [`series_start`]:
//!
//! ```text
//! temperature = 10·sin(2π(i−100)/360) + 6 + U(0,3) − 1.5
//! std_dev     = U(0,5)
//! delta       = 4·sin(2π(i−100)/36) + U(0,3) − 1.5
//! min         = temperature − std_dev − std_dev·U(0,1)
//! max         = temperature + std_dev + std_dev·U(0,1)
//! ```
//!
//! The min/max widening is random and not symmetric around `temperature`. The
//! shape is kept as is for compatibility with existing artifacts; it is not a
//! validated climatological model.

use crate::types::indicator::{
    Granularity, IndicatorMetadata, IndicatorPoint, NationalIndicatorResponse, SliceType,
};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const SERIES_LENGTH: usize = 365;

/// Baseline identifier reported when the synthetic series stands in for the remote one.
pub const SYNTHETIC_BASELINE: &str = "synthetic";

const PHASE_SHIFT_DAYS: f64 = 100.0;
const ANNUAL_PERIOD_DAYS: f64 = 360.0;
const SHORT_PERIOD_DAYS: f64 = 36.0;

/// First day of the series, 2025-01-01.
pub fn series_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPoint {
    pub date: NaiveDate,
    pub temperature: f64,
    /// Short-term deviation, one full cycle every 36 days.
    pub delta: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// The full generated series, serialized as a bare JSON array of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntheticSeries {
    points: Vec<SyntheticPoint>,
}

fn seasonal(day: f64, period: f64) -> f64 {
    (2.0 * PI * (day - PHASE_SHIFT_DAYS) / period).sin()
}

impl SyntheticSeries {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates the series drawing noise from `rng`; seed it for reproducible output.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let points = series_start()
            .iter_days()
            .take(SERIES_LENGTH)
            .enumerate()
            .map(|(i, date)| {
                let day = i as f64;
                let temperature =
                    10.0 * seasonal(day, ANNUAL_PERIOD_DAYS) + 6.0 + rng.gen_range(0.0..3.0) - 1.5;
                let std_dev = rng.gen_range(0.0..5.0);
                let delta = 4.0 * seasonal(day, SHORT_PERIOD_DAYS) + rng.gen_range(0.0..3.0) - 1.5;
                let min = temperature - std_dev - std_dev * rng.gen::<f64>();
                let max = temperature + std_dev + std_dev * rng.gen::<f64>();
                SyntheticPoint {
                    date,
                    temperature,
                    delta,
                    std_dev,
                    min,
                    max,
                }
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[SyntheticPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Projects the days in `[date_start, date_end]` onto the indicator shape.
    ///
    /// The seasonal temperature is the baseline mean, `±std_dev` the inner band and
    /// the widened min/max the outer band; the observed value is the seasonal
    /// temperature shifted by `delta`.
    pub fn to_national_indicator(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> NationalIndicatorResponse {
        let time_series = self
            .points
            .iter()
            .filter(|p| p.date >= date_start && p.date <= date_end)
            .map(|p| IndicatorPoint {
                date: p.date,
                temperature: p.temperature + p.delta,
                baseline_mean: p.temperature,
                baseline_std_dev_upper: p.temperature + p.std_dev,
                baseline_std_dev_lower: p.temperature - p.std_dev,
                baseline_max: p.max,
                baseline_min: p.min,
            })
            .collect();
        NationalIndicatorResponse {
            metadata: IndicatorMetadata {
                date_start,
                date_end,
                baseline: SYNTHETIC_BASELINE.to_string(),
                granularity: Granularity::Day,
                slice_type: SliceType::Full,
                month_of_year: None,
                day_of_month: None,
            },
            time_series,
        }
    }
}
