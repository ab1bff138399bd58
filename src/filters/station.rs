use crate::filters::{SortBy, SortField};
use bon::Builder;
use serde::Serialize;

/// Attributes `/stations/` can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationSort {
    Name,
    Department,
    Altitude,
}

impl SortField for StationSort {
    fn as_param(&self) -> &'static str {
        match self {
            StationSort::Name => "nom",
            StationSort::Department => "departement",
            StationSort::Altitude => "alt",
        }
    }
}

/// Query parameters accepted by `/stations/`.
///
/// # Examples
///
/// ```
/// use infoclimat::{QueryParams, StationFilters};
///
/// let filters = StationFilters::builder()
///     .department(75)
///     .is_open(true)
///     .limit(10)
///     .offset(0)
///     .build();
///
/// let pairs = filters.to_query_pairs().unwrap();
/// assert_eq!(pairs.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
pub struct StationFilters {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "departement", skip_serializing_if = "Option::is_none")]
    pub department: Option<i32>,
    #[builder(into)]
    #[serde(rename = "frequence", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(rename = "poste_ouvert", skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(rename = "poste_public", skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "super::finite")]
    pub lat_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "super::finite")]
    pub lat_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "super::finite")]
    pub lon_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "super::finite")]
    pub lon_max: Option<f64>,
    /// Free-text match on station name or code.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<SortBy<StationSort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl StationFilters {
    /// Same filters, another page.
    pub fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::QueryParams;

    fn pairs(filters: &StationFilters) -> Vec<(String, String)> {
        filters.to_query_pairs().unwrap()
    }

    #[test]
    fn test_empty_filters_produce_no_params() {
        assert!(pairs(&StationFilters::default()).is_empty());
    }

    #[test]
    fn test_only_set_fields_are_serialized() {
        let filters = StationFilters::builder()
            .department(75)
            .is_open(true)
            .limit(10)
            .offset(0)
            .build();

        let pairs = pairs(&filters);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["departement", "limit", "offset", "poste_ouvert"]);
        assert!(pairs.contains(&("departement".into(), "75".into())));
        assert!(pairs.contains(&("poste_ouvert".into(), "true".into())));
        assert!(pairs.contains(&("offset".into(), "0".into())));
    }

    #[test]
    fn test_inverted_bounds_are_forwarded_untouched() {
        let filters = StationFilters::builder()
            .lat_min(50.5)
            .lat_max(42.0)
            .build();
        let pairs = pairs(&filters);
        assert_eq!(
            pairs,
            vec![
                ("lat_max".to_string(), "42.0".to_string()),
                ("lat_min".to_string(), "50.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_finite_bounds_are_rejected() {
        let filters = StationFilters::builder()
            .department(75)
            .lat_min(f64::NAN)
            .build();
        let err = filters.to_query_pairs().unwrap_err();
        assert_eq!(err.code, "INVALID_PARAMETER");
        assert!(err.message.contains("finite"), "{}", err.message);

        let filters = StationFilters::builder().lon_max(f64::INFINITY).build();
        assert!(filters.to_query_pairs().is_err());
        let filters = StationFilters::builder().lon_min(f64::NEG_INFINITY).build();
        assert!(filters.to_query_pairs().is_err());
    }

    #[test]
    fn test_finite_bounds_still_serialize() {
        let filters = StationFilters::builder().lon_min(-0.5).lon_max(0.0).build();
        assert_eq!(
            pairs(&filters),
            vec![
                ("lon_max".to_string(), "0.0".to_string()),
                ("lon_min".to_string(), "-0.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_ordering_and_search() {
        let filters = StationFilters::builder()
            .search("Montsouris")
            .ordering(SortBy::desc(StationSort::Altitude))
            .build();
        let pairs = pairs(&filters);
        assert!(pairs.contains(&("ordering".into(), "-alt".into())));
        assert!(pairs.contains(&("search".into(), "Montsouris".into())));
    }

    #[test]
    fn test_with_offset_keeps_other_fields() {
        let filters = StationFilters::builder().code("75114001").limit(5).build();
        let next = filters.with_offset(5);
        assert_eq!(next.code.as_deref(), Some("75114001"));
        assert_eq!(next.limit, Some(5));
        assert_eq!(next.offset, Some(5));
    }
}
