//! The limit/offset pagination envelope shared by every collection endpoint.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Page size the remote service applies when no `limit` is sent.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// One page of a filtered collection.
///
/// `count` is the total number of records matching the filter, not the length of
/// `results`. `next` is `None` on the last page and `previous` is `None` on the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn is_first_page(&self) -> bool {
        self.previous.is_none()
    }

    pub fn is_last_page(&self) -> bool {
        self.next.is_none()
    }

    /// Offset to request to get the following page, read from the `next` link.
    ///
    /// `None` on the last page, and also when the link carries no readable
    /// `offset`: a following page never starts at 0.
    pub fn next_offset(&self) -> Option<u32> {
        self.next.as_deref().and_then(offset_of)
    }

    /// Offset of the preceding page. A `previous` link without an `offset`
    /// parameter points at the first page.
    pub fn previous_offset(&self) -> Option<u32> {
        self.previous
            .as_deref()
            .map(|link| offset_of(link).unwrap_or(0))
    }

    /// Checks the size relations a well-formed page holds: at most `limit` results
    /// (when a limit was requested) and never more results than the total count.
    pub fn is_consistent(&self, limit: Option<u32>) -> bool {
        let len = self.results.len() as u64;
        let within_limit = limit.map_or(true, |limit| len <= u64::from(limit));
        within_limit && self.count >= len
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

fn offset_of(link: &str) -> Option<u32> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "offset")
        .and_then(|(_, value)| value.parse().ok())
}
