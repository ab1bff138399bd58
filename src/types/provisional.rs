//! Temperature endpoints whose remote schema is not settled yet.
//!
//! Requests go through as a string parameter bag and responses come back wrapped in
//! [`SchemaPending`], so callers can see at the type level that the payload is not
//! part of the typed contract. Once the remote schema is fixed, each endpoint gets
//! typed filters and a typed response like the other collections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisionalEndpoint {
    Deviation,
    Extremes,
    Records,
    CumulativeRecords,
}

impl ProvisionalEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ProvisionalEndpoint::Deviation => "/temperature/deviation",
            ProvisionalEndpoint::Extremes => "/temperature/extremes",
            ProvisionalEndpoint::Records => "/temperature/records",
            ProvisionalEndpoint::CumulativeRecords => "/temperature/records/cumulative",
        }
    }
}

/// Pass-through query parameters for a [`ProvisionalEndpoint`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProvisionalQuery {
    params: BTreeMap<String, String>,
}

impl ProvisionalQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

/// A response body from an endpoint without a settled schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaPending<T = serde_json::Value> {
    pub endpoint: String,
    pub body: T,
}
