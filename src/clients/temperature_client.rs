//! Provides the `TemperatureClient` for the national temperature indicator and the
//! provisional temperature endpoints.
//!
//! The indicator is computed remotely; this client checks the parameter combination,
//! forwards it, and decodes the banded time series. The synthetic series written at
//! startup can be projected onto the same shape with
//! [`TemperatureClient::synthetic_national_indicator`] when no backend is reachable.

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::watch::{watch_query, FetchState};
use crate::synthetic::error::SyntheticSeriesError;
use crate::types::indicator::{
    Granularity, NationalIndicatorParams, NationalIndicatorResponse, SliceType,
};
use crate::types::provisional::{ProvisionalEndpoint, ProvisionalQuery, SchemaPending};
use crate::InfoClimat;
use bon::bon;
use chrono::NaiveDate;
use log::debug;
use tokio::sync::watch;

pub const NATIONAL_INDICATOR_PATH: &str = "/temperature/national-indicator";

/// Client for the `/temperature/` endpoints.
///
/// Instances are created by calling [`InfoClimat::temperature()`].
pub struct TemperatureClient<'a> {
    client: &'a InfoClimat,
}

#[bon]
impl<'a> TemperatureClient<'a> {
    pub(crate) fn new(client: &'a InfoClimat) -> Self {
        Self { client }
    }

    /// Requests the national temperature indicator.
    ///
    /// This method uses a builder: set the required `.date_start()`, `.date_end()` and
    /// `.granularity()`, any of the optional slicing parameters, then `.call().await`.
    ///
    /// # Arguments
    ///
    /// * `.date_start(NaiveDate)` / `.date_end(NaiveDate)`: **Required.** Inclusive range.
    ///   `date_start <= date_end` is expected; the remote service rejects other ranges.
    /// * `.granularity(Granularity)`: **Required.** Year, month or day points.
    /// * `.slice_type(SliceType)`: Optional, defaults to [`SliceType::Full`].
    /// * `.month_of_year(u32)`: Required for a `MonthOfYear` slice, and for a
    ///   `DayOfMonth` slice at yearly granularity.
    /// * `.day_of_month(u32)`: Required for a `DayOfMonth` slice.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything when the parameter
    /// combination is invalid (see [`NationalIndicatorParams::validate`]), or when the
    /// remote service rejects it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use infoclimat::{InfoClimat, InfoClimatError, Granularity, SliceType};
    /// use chrono::NaiveDate;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), InfoClimatError> {
    /// let client = InfoClimat::new().await?;
    ///
    /// // Every July from 2000 to 2024, one point per year
    /// let julys = client
    ///     .temperature()
    ///     .national_indicator()
    ///     .date_start(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
    ///     .date_end(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
    ///     .granularity(Granularity::Year)
    ///     .slice_type(SliceType::MonthOfYear)
    ///     .month_of_year(7)
    ///     .call()
    ///     .await?;
    ///
    /// for point in &julys.time_series {
    ///     println!(
    ///         "{}: {:.1} °C (baseline {:.1} °C)",
    ///         point.date, point.temperature, point.baseline_mean
    ///     );
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn national_indicator(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
        granularity: Granularity,
        slice_type: Option<SliceType>,
        month_of_year: Option<u32>,
        day_of_month: Option<u32>,
    ) -> Result<NationalIndicatorResponse, ApiError> {
        let params = NationalIndicatorParams {
            date_start,
            date_end,
            granularity,
            slice_type,
            month_of_year,
            day_of_month,
        };
        self.fetch_national_indicator(&params).await
    }

    /// Same as [`Self::national_indicator`] with a prepared parameter set.
    ///
    /// # Arguments
    ///
    /// * `params` - Checked with [`NationalIndicatorParams::validate`] before sending.
    ///
    /// # Returns
    ///
    /// A `Result` containing the [`NationalIndicatorResponse`]: the echoed metadata
    /// and one banded point per period.
    ///
    /// # Errors
    ///
    /// Can return [`ApiError::Validation`] for an invalid combination (no request is
    /// made) or a remote rejection, and the transport, status and decode errors of any
    /// other request.
    pub async fn fetch_national_indicator(
        &self,
        params: &NationalIndicatorParams,
    ) -> Result<NationalIndicatorResponse, ApiError> {
        fetch_national_indicator(self.client.api(), params).await
    }

    /// Requests the indicator again whenever `params` changes. Parameter sets that
    /// fail local validation resolve to an error without a request.
    ///
    /// # Returns
    ///
    /// A receiver of [`FetchState`]; the last request to resolve wins.
    pub fn watch_national_indicator(
        &self,
        params: watch::Receiver<NationalIndicatorParams>,
    ) -> watch::Receiver<FetchState<NationalIndicatorResponse>> {
        let api = self.client.api().clone();
        watch_query(params, move |params: NationalIndicatorParams| {
            let api = api.clone();
            async move { fetch_national_indicator(&api, &params).await }
        })
    }

    /// Builds an indicator response for `[date_start, date_end]` from the synthetic
    /// series materialized at startup. Days outside the series are left out.
    ///
    /// # Errors
    ///
    /// Can return a [`SyntheticSeriesError`] if the artifact cannot be read back.
    pub async fn synthetic_national_indicator(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<NationalIndicatorResponse, SyntheticSeriesError> {
        let series = self.client.synthetic_series().await?;
        Ok(series.to_national_indicator(date_start, date_end))
    }

    /// Calls a temperature endpoint whose response schema is not settled yet.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Which of the provisional endpoints to call.
    /// * `query` - Forwarded as-is.
    ///
    /// # Returns
    ///
    /// A `Result` containing the raw JSON body, tagged with the endpoint path.
    ///
    /// # Errors
    ///
    /// The same as any other GET: [`ApiError::Validation`] on a 400,
    /// [`ApiError::NotFound`] on a 404, and so on.
    pub async fn provisional(
        &self,
        endpoint: ProvisionalEndpoint,
        query: &ProvisionalQuery,
    ) -> Result<SchemaPending, ApiError> {
        let body = self.client.api().get(endpoint.path(), query).await?;
        Ok(SchemaPending {
            endpoint: endpoint.path().to_string(),
            body,
        })
    }

    /// `GET /temperature/deviation`. See [`Self::provisional`].
    pub async fn deviation(&self, query: &ProvisionalQuery) -> Result<SchemaPending, ApiError> {
        self.provisional(ProvisionalEndpoint::Deviation, query).await
    }

    /// `GET /temperature/extremes`. See [`Self::provisional`].
    pub async fn extremes(&self, query: &ProvisionalQuery) -> Result<SchemaPending, ApiError> {
        self.provisional(ProvisionalEndpoint::Extremes, query).await
    }

    /// `GET /temperature/records`. See [`Self::provisional`].
    pub async fn records(&self, query: &ProvisionalQuery) -> Result<SchemaPending, ApiError> {
        self.provisional(ProvisionalEndpoint::Records, query).await
    }

    /// `GET /temperature/records/cumulative`. See [`Self::provisional`].
    pub async fn cumulative_records(
        &self,
        query: &ProvisionalQuery,
    ) -> Result<SchemaPending, ApiError> {
        self.provisional(ProvisionalEndpoint::CumulativeRecords, query)
            .await
    }
}

async fn fetch_national_indicator(
    api: &ApiClient,
    params: &NationalIndicatorParams,
) -> Result<NationalIndicatorResponse, ApiError> {
    if let Err(e) = params.validate() {
        debug!("Not requesting national indicator: {}", e);
        return Err(e.into());
    }
    api.get(NATIONAL_INDICATOR_PATH, params).await
}
