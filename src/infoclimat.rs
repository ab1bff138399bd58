//! The main entry point: an [`InfoClimat`] client bound to one remote service, with
//! per-resource sub-clients for stations, measurements and temperature indicators.

use crate::api::client::ApiClient;
use crate::api::transport::{ReqwestTransport, Transport};
use crate::clients::daily_client::DailyClient;
use crate::clients::hourly_client::HourlyClient;
use crate::clients::station_client::StationClient;
use crate::clients::temperature_client::TemperatureClient;
use crate::error::InfoClimatError;
use crate::settings::Settings;
use crate::synthetic::error::SyntheticSeriesError;
use crate::synthetic::generator::SyntheticSeries;
use crate::synthetic::store::SyntheticSeriesStore;
use log::info;
use reqwest::Url;
use std::sync::Arc;

/// The client for the InfoClimat API.
///
/// Construction materializes the synthetic indicator series on disk (once per
/// artifact: an existing file is never regenerated). If that fails the client is not
/// built and [`InfoClimatError::StartupFailed`] is returned.
///
/// Every request made through a sub-client is a single round trip; nothing is cached
/// or retried.
///
/// # Examples
///
/// ```no_run
/// # use infoclimat::{InfoClimat, InfoClimatError, StationFilters};
/// # #[tokio::main]
/// # async fn main() -> Result<(), InfoClimatError> {
/// // Reads INFOCLIMAT_API_BASE (and optionally config/infoclimat.toml)
/// let client = InfoClimat::new().await?;
///
/// let page = client
///     .stations()
///     .list(&StationFilters::builder().department(75).limit(10).build())
///     .await?;
/// println!("{} stations in Paris, showing {}", page.count, page.results.len());
/// # Ok(())
/// # }
/// ```
pub struct InfoClimat {
    api: ApiClient,
    synthetic: SyntheticSeriesStore,
}

impl InfoClimat {
    /// Creates a client from [`Settings::load`].
    ///
    /// # Errors
    ///
    /// Returns [`InfoClimatError::Config`] if the settings cannot be loaded (for
    /// instance when no API base URL is configured), and any error
    /// [`InfoClimat::with_settings`] can return.
    pub async fn new() -> Result<Self, InfoClimatError> {
        let settings = Settings::load()?;
        Self::with_settings(settings).await
    }

    /// Creates a client talking to `settings.api_base` over HTTP.
    ///
    /// # Errors
    ///
    /// * [`InfoClimatError::InvalidBaseUrl`] if `api_base` is not an absolute URL.
    /// * [`InfoClimatError::HttpClient`] if the HTTP client cannot be built.
    /// * [`InfoClimatError::StartupFailed`] if the synthetic series cannot be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use infoclimat::{InfoClimat, InfoClimatError, Settings};
    /// # async fn run() -> Result<(), InfoClimatError> {
    /// let settings = Settings::new("https://api.example.org/api/v1")
    ///     .with_synthetic_series_path("/tmp/national_indicator_synthetic.json");
    /// let client = InfoClimat::with_settings(settings).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_settings(settings: Settings) -> Result<Self, InfoClimatError> {
        let transport =
            ReqwestTransport::new(settings.request_timeout()).map_err(InfoClimatError::HttpClient)?;
        Self::with_transport(settings, Arc::new(transport)).await
    }

    /// Creates a client that sends its requests through `transport`.
    ///
    /// # Arguments
    ///
    /// * `settings` - Base URL and synthetic series location.
    /// * `transport` - Sends every request; swap it out to run without a network.
    ///
    /// # Errors
    ///
    /// The same as [`InfoClimat::with_settings`], except
    /// [`InfoClimatError::HttpClient`], since no HTTP client is built.
    pub async fn with_transport(
        settings: Settings,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, InfoClimatError> {
        let base_url = parse_base_url(&settings.api_base)?;
        let mut synthetic = SyntheticSeriesStore::new(settings.synthetic_series_path);
        let outcome = synthetic.materialize().await?;
        info!(
            "InfoClimat client ready for {} (synthetic series: {:?})",
            base_url, outcome
        );
        Ok(Self {
            api: ApiClient::new(base_url, transport),
            synthetic,
        })
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The API root every endpoint path is resolved against.
    pub fn base_url(&self) -> &Url {
        self.api.base_url()
    }

    /// Returns a [`StationClient`] for station listing and detail lookups.
    ///
    /// The sub-client borrows `self` and is cheap to create; make one per call site.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use infoclimat::{InfoClimat, InfoClimatError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), InfoClimatError> {
    /// let client = InfoClimat::new().await?;
    /// let montsouris = client.stations().get("75114001").await?;
    /// println!("{} opened {}", montsouris.station.name, montsouris.created_at);
    /// # Ok(())
    /// # }
    /// ```
    pub fn stations(&self) -> StationClient<'_> {
        StationClient::new(self)
    }

    /// Returns an [`HourlyClient`] for hourly measurements, including the latest
    /// record per station.
    pub fn hourly(&self) -> HourlyClient<'_> {
        HourlyClient::new(self)
    }

    /// Returns a [`DailyClient`] for daily measurement summaries.
    ///
    /// Daily records come from their own endpoint; they are not computed from the
    /// hourly ones.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use infoclimat::{InfoClimat, InfoClimatError, DailyFilters};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), InfoClimatError> {
    /// let client = InfoClimat::new().await?;
    /// let filters = DailyFilters::builder().station_code("13055001").limit(7).build();
    /// let week = client.daily().list(&filters).await?;
    /// println!("{} days on record", week.count);
    /// # Ok(())
    /// # }
    /// ```
    pub fn daily(&self) -> DailyClient<'_> {
        DailyClient::new(self)
    }

    /// Returns a [`TemperatureClient`] for the national temperature indicator and
    /// the provisional temperature endpoints.
    pub fn temperature(&self) -> TemperatureClient<'_> {
        TemperatureClient::new(self)
    }

    /// The on-disk store of the synthetic series. It is always
    /// [`Materialized`](crate::MaterializationState::Materialized) once the client exists.
    pub fn synthetic_store(&self) -> &SyntheticSeriesStore {
        &self.synthetic
    }

    /// Reads the materialized synthetic series back from disk.
    ///
    /// # Returns
    ///
    /// A `Result` containing the 365 generated daily points, in date order.
    ///
    /// # Errors
    ///
    /// Can return [`SyntheticSeriesError::Read`] if the artifact was removed after
    /// startup, or [`SyntheticSeriesError::Decode`] if it was replaced by something
    /// that is not a series.
    pub async fn synthetic_series(&self) -> Result<SyntheticSeries, SyntheticSeriesError> {
        self.synthetic.load().await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, InfoClimatError> {
    let invalid = |reason: String| InfoClimatError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_string()));
    }
    Ok(url)
}
