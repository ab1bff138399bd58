mod api;
mod clients;
mod error;
mod filters;
mod infoclimat;
mod settings;
mod synthetic;
mod types;
mod utils;

pub use error::InfoClimatError;
pub use infoclimat::*;
pub use settings::Settings;

pub use api::client::ApiClient;
pub use api::collection::CollectionClient;
pub use api::error::{ApiError, ErrorBody, ErrorEnvelope, TransportError, ValidationError};
pub use api::transport::{HttpResponse, ReqwestTransport, Transport};
pub use api::watch::{wait_for, watch_query, FetchState};

pub use clients::daily_client::*;
pub use clients::hourly_client::*;
pub use clients::station_client::*;
pub use clients::temperature_client::*;

pub use filters::daily::{DailyFilters, DailySort};
pub use filters::hourly::{HourlyFilters, HourlySort};
pub use filters::station::{StationFilters, StationSort};
pub use filters::{QueryParams, SortBy, SortField};

pub use types::indicator::*;
pub use types::measurements::daily::DailyMeasurement;
pub use types::measurements::hourly::HourlyMeasurement;
pub use types::pagination::{PaginatedResponse, DEFAULT_PAGE_SIZE};
pub use types::provisional::{ProvisionalEndpoint, ProvisionalQuery, SchemaPending};
pub use types::station::*;

pub use synthetic::error::SyntheticSeriesError;
pub use synthetic::generator::{SyntheticPoint, SyntheticSeries, SERIES_LENGTH, SYNTHETIC_BASELINE};
pub use synthetic::store::{
    Materialization, MaterializationState, SyntheticSeriesStore, DEFAULT_SYNTHETIC_SERIES_PATH,
};
