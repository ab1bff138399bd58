//! Provides the `HourlyClient` for hourly measurements.
//!
//! Obtained via [`InfoClimat::hourly()`]. Lists are paginated and filtered with
//! [`HourlyFilters`]; [`HourlyClient::latest`] returns the most recent record of each
//! station in a single unpaginated response.

use crate::api::collection::CollectionClient;
use crate::api::error::ApiError;
use crate::api::watch::FetchState;
use crate::filters::hourly::HourlyFilters;
use crate::types::measurements::hourly::HourlyMeasurement;
use crate::types::pagination::PaginatedResponse;
use crate::InfoClimat;
use tokio::sync::watch;

pub const HOURLY_PATH: &str = "/horaire/";
pub const HOURLY_LATEST_PATH: &str = "/horaire/latest/";

/// Client for the `/horaire/` endpoints.
///
/// Instances are created by calling [`InfoClimat::hourly()`].
pub struct HourlyClient<'a> {
    client: &'a InfoClimat,
}

impl<'a> HourlyClient<'a> {
    pub(crate) fn new(client: &'a InfoClimat) -> Self {
        Self { client }
    }

    fn collection(&self) -> CollectionClient<HourlyFilters, HourlyMeasurement> {
        CollectionClient::new(self.client.api().clone(), HOURLY_PATH)
    }

    /// Fetches one page of hourly measurements.
    ///
    /// # Arguments
    ///
    /// * `filters` - Station, time window, temperature bounds, ordering and page.
    ///   Unset fields are not sent.
    ///
    /// # Returns
    ///
    /// A `Result` containing a [`PaginatedResponse`] of [`HourlyMeasurement`]s. Every
    /// sensor reading may be `None` when the sensor did not report.
    ///
    /// # Errors
    ///
    /// Can return [`ApiError::Validation`] if a filter cannot be encoded (NaN or an
    /// infinite temperature bound, in which case no request is sent) or the remote
    /// service rejects it, [`ApiError::Transport`] if the request does not complete,
    /// and [`ApiError::Decode`] if the page cannot be parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use infoclimat::{InfoClimat, InfoClimatError, HourlyFilters, HourlySort, SortBy};
    /// use chrono::{TimeZone, Utc};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), InfoClimatError> {
    /// let client = InfoClimat::new().await?;
    /// let filters = HourlyFilters::builder()
    ///     .station_code("75114001")
    ///     .validity_time_after(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
    ///     .validity_time_before(Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 0).unwrap())
    ///     .ordering(SortBy::asc(HourlySort::ValidityTime))
    ///     .build();
    ///
    /// let page = client.hourly().list(&filters).await?;
    /// for m in &page.results {
    ///     println!("{}: {:?} °C", m.validity_time, m.temperature);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(
        &self,
        filters: &HourlyFilters,
    ) -> Result<PaginatedResponse<HourlyMeasurement>, ApiError> {
        self.collection().fetch(filters).await
    }

    /// Re-runs [`Self::list`] whenever `filters` changes.
    ///
    /// # Arguments
    ///
    /// * `filters` - Every distinct value sent triggers one request.
    ///
    /// # Returns
    ///
    /// A receiver of [`FetchState`]. Overlapping requests are not cancelled; the
    /// state reflects whichever one resolved last, and `pending` stays `true` until
    /// none are left in flight.
    pub fn watch_list(
        &self,
        filters: watch::Receiver<HourlyFilters>,
    ) -> watch::Receiver<FetchState<PaginatedResponse<HourlyMeasurement>>> {
        self.collection().watch(filters)
    }

    /// The most recent hourly record of each station.
    ///
    /// Which record wins when a station has several with the same timestamp is up to
    /// the remote service; no de-duplication happens here.
    ///
    /// # Returns
    ///
    /// A `Result` containing every record in one unpaginated list.
    ///
    /// # Errors
    ///
    /// Can return [`ApiError::Transport`], [`ApiError::Status`] or
    /// [`ApiError::Decode`].
    pub async fn latest(&self) -> Result<Vec<HourlyMeasurement>, ApiError> {
        self.client.api().get(HOURLY_LATEST_PATH, &()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{test_client, MockTransport, Reply};
    use crate::api::transport::HttpResponse;
    use crate::api::watch::wait_for;
    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    fn measurement(id: i64, station_code: &str, t: f64) -> Value {
        json!({
            "id": id,
            "station": 1,
            "station_code": station_code,
            "lat": 48.82,
            "lon": 2.33,
            "validity_time": "2024-07-01T12:00:00Z",
            "t": t,
            "td": null,
            "tx": null,
            "tn": null,
            "u": 40.0,
            "dd": null,
            "ff": null,
            "rr1": 0.0,
            "vv": null,
            "n": null,
            "pres": null,
            "pmer": null
        })
    }

    fn page(results: Vec<Value>) -> HttpResponse {
        HttpResponse::json(
            StatusCode::OK,
            &json!({
                "count": results.len(),
                "next": null,
                "previous": null,
                "results": results
            }),
        )
    }

    #[tokio::test]
    async fn test_latest_is_unpaginated() {
        let mock = MockTransport::new(|_| {
            HttpResponse::json(
                StatusCode::OK,
                &json!([measurement(1, "75114001", 21.5), measurement(2, "13055001", 27.0)]),
            )
            .into()
        });
        let (client, _dir) = test_client(mock.clone()).await;

        let latest = client.hourly().latest().await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[1].station_code, "13055001");
        assert_eq!(latest[0].dew_point, None);

        let url = &mock.requests()[0];
        assert_eq!(url.path(), "/api/v1/horaire/latest/");
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_list_forwards_filters() {
        let mock = MockTransport::new(|_| page(vec![measurement(1, "75114001", 18.0)]).into());
        let (client, _dir) = test_client(mock.clone()).await;

        let filters = HourlyFilters::builder()
            .station_code("75114001")
            .temperature_min(10.0)
            .limit(50)
            .build();
        let result = client.hourly().list(&filters).await.unwrap();
        assert_eq!(result.results[0].temperature, Some(18.0));
        assert_eq!(
            mock.requests()[0].query(),
            Some("limit=50&station_code=75114001&t_min=10.0")
        );
    }

    #[tokio::test]
    async fn test_non_finite_bound_fails_before_sending() {
        let mock = MockTransport::new(|_| page(vec![]).into());
        let (client, _dir) = test_client(mock.clone()).await;

        let filters = HourlyFilters::builder()
            .station_code("75114001")
            .temperature_max(f64::INFINITY)
            .build();
        let err = client.hourly().list(&filters).await.unwrap_err();
        assert!(err.as_validation().is_some());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_order_resolution_keeps_last_resolved() {
        let (release_first, first) = oneshot::channel();
        let (release_second, second) = oneshot::channel();
        let gates = Mutex::new(vec![Some(first), Some(second)]);
        let mock = MockTransport::new(move |_| {
            let mut gates = gates.lock().unwrap();
            let index = gates.iter().position(Option::is_some).unwrap();
            Reply::Gated(gates[index].take().unwrap())
        });
        let (client, _dir) = test_client(mock.clone()).await;

        let (filters_tx, filters_rx) =
            watch::channel(HourlyFilters::builder().station_code("75114001").build());
        let mut state = client.hourly().watch_list(filters_rx);
        mock.wait_for_requests(1).await;

        // issued before the first request resolves
        filters_tx.send_replace(HourlyFilters::builder().station_code("13055001").build());
        mock.wait_for_requests(2).await;
        assert!(state.borrow().pending);

        // the second request resolves first...
        release_second
            .send(page(vec![measurement(2, "13055001", 27.0)]))
            .unwrap();
        let interim = wait_for(&mut state, |s| s.data.is_some()).await;
        assert!(interim.pending);
        assert_eq!(interim.data.unwrap().results[0].station_code, "13055001");

        // ...and the first one, resolving last, determines the final state
        release_first
            .send(page(vec![measurement(1, "75114001", 21.5)]))
            .unwrap();
        let settled = wait_for(&mut state, |s| !s.pending).await;
        assert!(settled.error.is_none());
        assert_eq!(settled.data.unwrap().results[0].station_code, "75114001");

        let requested: Vec<String> = mock
            .requests()
            .iter()
            .map(|u| u.query().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            requested,
            vec!["station_code=75114001", "station_code=13055001"]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_in_state() {
        let (client, _dir) = test_client(MockTransport::failing("connection reset")).await;
        let (_tx, rx) = watch::channel(HourlyFilters::default());
        let mut state = client.hourly().watch_list(rx);
        let failed = wait_for(&mut state, |s| s.error.is_some()).await;
        assert!(!failed.pending);
        assert!(failed.data.is_none());
        assert!(matches!(
            failed.error.as_deref(),
            Some(ApiError::Transport { .. })
        ));
    }
}
