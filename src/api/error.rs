use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Opaque failure raised by a [`crate::Transport`] implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Error code used for parameters rejected before any request is made.
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No resource found at {url}")]
    NotFound { url: String },

    #[error("Network request failed for {url}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("HTTP request failed for {url} with status {status}")]
    Status {
        url: String,
        status: StatusCode,
        error: Option<ErrorBody>,
    },

    #[error("Failed to decode response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// A parameter set rejected either locally or by the remote service.
///
/// `details` maps each offending field to the messages explaining the rejection,
/// the same way the remote error envelope reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub details: BTreeMap<String, Value>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMETER.to_string(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Records a message against `field`, appending to any messages already present.
    pub fn add_field_error(&mut self, field: &str, message: impl Into<String>) {
        let entry = self
            .details
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(Value::String(message.into()));
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.details.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if !self.details.is_empty() {
            let fields: Vec<&str> = self.details.keys().map(String::as_str).collect();
            write!(f, " ({})", fields.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ErrorBody> for ValidationError {
    fn from(body: ErrorBody) -> Self {
        let details = match body.details {
            Some(Value::Object(map)) => map.into_iter().collect(),
            Some(other) => BTreeMap::from([("non_field_errors".to_string(), other)]),
            None => BTreeMap::new(),
        };
        Self {
            code: body.code,
            message: body.message,
            details,
        }
    }
}

/// The `{"error": {...}}` envelope returned by the remote service on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    /// Decodes an envelope, returning `None` when the body has some other shape.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}
