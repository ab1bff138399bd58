//! Typed filter objects for the paginated endpoints and their mapping onto query
//! parameters.
//!
//! A filter field left as `None` means "not filtered" and never reaches the wire.
//! Values are forwarded as given: range pairs such as `lat_min`/`lat_max` are not
//! reordered or clamped, the remote service decides what to do with them.

pub mod daily;
pub mod hourly;
pub mod station;

use crate::api::error::ValidationError;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Anything that can be sent as a query string.
///
/// Implemented for every `Serialize` type whose serialized form is a flat map.
pub trait QueryParams {
    /// Returns the `(key, value)` pairs to append to the request URL, sorted by key,
    /// skipping unset fields.
    fn to_query_pairs(&self) -> Result<Vec<(String, String)>, ValidationError>;
}

impl<T: Serialize> QueryParams for T {
    fn to_query_pairs(&self) -> Result<Vec<(String, String)>, ValidationError> {
        let value = serde_json::to_value(self)
            .map_err(|e| ValidationError::new(format!("Failed to encode query: {e}")))?;
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .filter_map(|(key, value)| query_value(value).map(|v| (key, v)))
                .collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(ValidationError::new(format!(
                "Query parameters must be a map of fields, got {other}"
            ))),
        }
    }
}

fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// `serialize_with` target for numeric bounds: NaN and infinities have no query
/// representation and would otherwise turn into `null` and vanish from the request.
pub(crate) fn finite<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if !v.is_finite() => Err(serde::ser::Error::custom(format!(
            "expected a finite number, got {v}"
        ))),
        _ => value.serialize(serializer),
    }
}

/// An attribute the remote service accepts in an `ordering` parameter.
pub trait SortField: Copy {
    fn as_param(&self) -> &'static str;
}

/// `ordering=<field>` or, for descending order, `ordering=-<field>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy<F> {
    pub field: F,
    pub descending: bool,
}

impl<F: SortField> SortBy<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

impl<F: SortField> fmt::Display for SortBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field.as_param())
        } else {
            f.write_str(self.field.as_param())
        }
    }
}

impl<F: SortField> Serialize for SortBy<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
