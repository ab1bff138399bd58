//! Provides the `StationClient` for listing stations and looking up a single station.
//!
//! Obtained via [`InfoClimat::stations()`].

use crate::api::client::ApiClient;
use crate::api::collection::CollectionClient;
use crate::api::error::ApiError;
use crate::api::watch::{watch_query, FetchState};
use crate::filters::station::StationFilters;
use crate::types::pagination::PaginatedResponse;
use crate::types::station::{Station, StationDetail, StationId};
use crate::InfoClimat;
use tokio::sync::watch;

pub const STATIONS_PATH: &str = "/stations/";

/// Client for the `/stations/` endpoints.
///
/// Created by [`InfoClimat::stations()`].
pub struct StationClient<'a> {
    client: &'a InfoClimat,
}

impl<'a> StationClient<'a> {
    pub(crate) fn new(client: &'a InfoClimat) -> Self {
        Self { client }
    }

    fn collection(&self) -> CollectionClient<StationFilters, Station> {
        CollectionClient::new(self.client.api().clone(), STATIONS_PATH)
    }

    /// Fetches one page of stations matching `filters`.
    ///
    /// # Arguments
    ///
    /// * `filters` - Unset fields are not sent. `limit` and `offset` select the page.
    ///
    /// # Returns
    ///
    /// A `Result` containing a [`PaginatedResponse`] whose `count` is the total number
    /// of matching stations, not the size of this page. Advance with
    /// [`StationFilters::with_offset`] and [`PaginatedResponse::next_offset`].
    ///
    /// # Errors
    ///
    /// * [`ApiError::Validation`] if a filter cannot be encoded (a non-finite
    ///   coordinate bound, for instance) or the remote service rejects it. Nothing is
    ///   sent in the first case.
    /// * [`ApiError::Transport`] if the request does not complete.
    /// * [`ApiError::Status`] for any other unsuccessful status.
    /// * [`ApiError::Decode`] if the page cannot be parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use infoclimat::{InfoClimat, InfoClimatError, StationFilters, SortBy, StationSort};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), InfoClimatError> {
    /// let client = InfoClimat::new().await?;
    /// let filters = StationFilters::builder()
    ///     .department(75)
    ///     .is_open(true)
    ///     .ordering(SortBy::desc(StationSort::Altitude))
    ///     .limit(10)
    ///     .build();
    ///
    /// let page = client.stations().list(&filters).await?;
    /// for station in &page.results {
    ///     println!("{} ({}) at {} m", station.name, station.code, station.alt);
    /// }
    /// if let Some(offset) = page.next_offset() {
    ///     let next = client.stations().list(&filters.with_offset(offset)).await?;
    ///     println!("next page has {} stations", next.results.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, filters: &StationFilters) -> Result<PaginatedResponse<Station>, ApiError> {
        self.collection().fetch(filters).await
    }

    /// Re-runs [`Self::list`] every time the filters in `filters` change.
    ///
    /// # Arguments
    ///
    /// * `filters` - The current value is fetched immediately, then every value sent
    ///   afterwards. Dropping the sender ends the watch.
    ///
    /// # Returns
    ///
    /// A receiver of [`FetchState`]. `pending` stays `true` while any request is in
    /// flight; `data` and `error` reflect the request that resolved last, which is not
    /// necessarily the one issued last. Failures land in `error`, never in a panic.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn watch_list(
        &self,
        filters: watch::Receiver<StationFilters>,
    ) -> watch::Receiver<FetchState<PaginatedResponse<Station>>> {
        self.collection().watch(filters)
    }

    /// Fetches a single station by numeric id or by code.
    ///
    /// # Arguments
    ///
    /// * `id` - An `i64` id or a station code such as `"75114001"`. Codes are
    ///   percent-encoded into the path.
    ///
    /// # Returns
    ///
    /// A `Result` containing the [`StationDetail`], with creation and update times.
    ///
    /// # Errors
    ///
    /// Can return [`ApiError::NotFound`] if no station matches, or any of the
    /// transport and decode errors [`Self::list`] can return.
    pub async fn get(&self, id: impl Into<StationId>) -> Result<StationDetail, ApiError> {
        fetch_station(self.client.api(), &id.into()).await
    }

    /// Fetches the station again whenever the id in `id` changes.
    ///
    /// Same state semantics as [`Self::watch_list`]; an unknown id shows up as
    /// [`ApiError::NotFound`] in `error` with `data` cleared.
    pub fn watch_station(
        &self,
        id: watch::Receiver<StationId>,
    ) -> watch::Receiver<FetchState<StationDetail>> {
        let api = self.client.api().clone();
        watch_query(id, move |id: StationId| {
            let api = api.clone();
            async move { fetch_station(&api, &id).await }
        })
    }
}

fn station_path(id: &StationId) -> String {
    format!("{}{}/", STATIONS_PATH, urlencoding::encode(&id.to_string()))
}

async fn fetch_station(api: &ApiClient, id: &StationId) -> Result<StationDetail, ApiError> {
    api.get(&station_path(id), &()).await
}
