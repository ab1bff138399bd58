//! Provides the `DailyClient` for daily measurement summaries.

use crate::api::collection::CollectionClient;
use crate::api::error::ApiError;
use crate::api::watch::FetchState;
use crate::filters::daily::DailyFilters;
use crate::types::measurements::daily::DailyMeasurement;
use crate::types::pagination::PaginatedResponse;
use crate::InfoClimat;
use tokio::sync::watch;

pub const DAILY_PATH: &str = "/quotidien/";

/// Client for `/quotidien/`, created by [`InfoClimat::daily()`].
///
/// Daily records are separate observations, not aggregates of the hourly ones.
pub struct DailyClient<'a> {
    client: &'a InfoClimat,
}

impl<'a> DailyClient<'a> {
    pub(crate) fn new(client: &'a InfoClimat) -> Self {
        Self { client }
    }

    fn collection(&self) -> CollectionClient<DailyFilters, DailyMeasurement> {
        CollectionClient::new(self.client.api().clone(), DAILY_PATH)
    }

    /// Fetches one page of daily summaries.
    ///
    /// # Arguments
    ///
    /// * `filters` - Station, inclusive date range, `tn`/`tx` bounds, ordering and
    ///   page. Unset fields are not sent.
    ///
    /// # Returns
    ///
    /// A `Result` containing a [`PaginatedResponse`] of [`DailyMeasurement`]s, with
    /// missing readings as `None`.
    ///
    /// # Errors
    ///
    /// Can return [`ApiError::Validation`] if a filter cannot be encoded or is
    /// rejected remotely, [`ApiError::Transport`] if the request does not complete,
    /// or [`ApiError::Decode`] if the page cannot be parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use infoclimat::{InfoClimat, InfoClimatError, DailyFilters, DailySort, SortBy};
    /// use chrono::NaiveDate;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), InfoClimatError> {
    /// let client = InfoClimat::new().await?;
    /// let hottest_days = client
    ///     .daily()
    ///     .list(
    ///         &DailyFilters::builder()
    ///             .station_code("13055001")
    ///             .date_after(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())
    ///             .date_before(NaiveDate::from_ymd_opt(2023, 8, 31).unwrap())
    ///             .ordering(SortBy::desc(DailySort::TemperatureMax))
    ///             .limit(5)
    ///             .build(),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(
        &self,
        filters: &DailyFilters,
    ) -> Result<PaginatedResponse<DailyMeasurement>, ApiError> {
        self.collection().fetch(filters).await
    }

    /// Re-runs [`Self::list`] whenever `filters` changes.
    ///
    /// # Arguments
    ///
    /// * `filters` - The current value is fetched right away, then each new value.
    ///
    /// # Returns
    ///
    /// A receiver of [`FetchState`] holding the outcome of the last request to
    /// resolve. Errors, including remote validation errors, are reported in its
    /// `error` field.
    pub fn watch_list(
        &self,
        filters: watch::Receiver<DailyFilters>,
    ) -> watch::Receiver<FetchState<PaginatedResponse<DailyMeasurement>>> {
        self.collection().watch(filters)
    }
}
