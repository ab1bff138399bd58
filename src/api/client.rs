use crate::api::error::{ApiError, ErrorEnvelope, ValidationError};
use crate::api::transport::Transport;
use crate::filters::QueryParams;
use log::{debug, warn};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Joins endpoint paths onto the configured base URL and turns raw responses into
/// typed results. One call, one round trip: nothing is cached or retried.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL for `path` (which keeps its trailing slash, if any)
    /// below the base URL's own path.
    pub fn endpoint_url(&self, path: &str, query: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// GETs `path` with `params` serialized as the query string and decodes the body.
    pub async fn get<T, Q>(&self, path: &str, params: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: QueryParams + ?Sized,
    {
        let query = params.to_query_pairs()?;
        self.get_url(self.endpoint_url(path, &query)).await
    }

    pub async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let url_string = url.to_string();
        debug!("GET {}", url_string);

        let response = self
            .transport
            .get(url)
            .await
            .map_err(|source| {
                warn!("Request to {} failed: {}", url_string, source);
                ApiError::Transport {
                    url: url_string.clone(),
                    source,
                }
            })?;

        match response.status {
            status if status.is_success() => {
                serde_json::from_slice(&response.body).map_err(|source| ApiError::Decode {
                    url: url_string,
                    source,
                })
            }
            StatusCode::BAD_REQUEST => {
                let err = match ErrorEnvelope::parse(&response.body) {
                    Some(envelope) => ValidationError::from(envelope.error),
                    None => ValidationError::new("Request rejected by the remote service"),
                };
                warn!("Request to {} rejected: {}", url_string, err);
                Err(ApiError::Validation(err))
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { url: url_string }),
            status => {
                warn!("Request to {} failed with status {}", url_string, status);
                Err(ApiError::Status {
                    url: url_string,
                    status,
                    error: ErrorEnvelope::parse(&response.body).map(|e| e.error),
                })
            }
        }
    }
}
