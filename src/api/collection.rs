use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::watch::{watch_query, FetchState};
use crate::filters::QueryParams;
use crate::types::pagination::PaginatedResponse;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tokio::sync::watch;

/// A paginated, filterable collection endpoint.
///
/// `F` is the filter type sent as the query string, `T` the record type in
/// `results`. Pages are never merged: to move through the collection, fetch again
/// with another `offset`.
pub struct CollectionClient<F, T> {
    api: ApiClient,
    path: &'static str,
    _marker: PhantomData<fn(F) -> T>,
}

impl<F, T> Clone for CollectionClient<F, T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            path: self.path,
            _marker: PhantomData,
        }
    }
}

impl<F, T> CollectionClient<F, T>
where
    F: QueryParams + Clone + PartialEq + Send + Sync + 'static,
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(api: ApiClient, path: &'static str) -> Self {
        Self {
            api,
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Fetches the page selected by `filters`.
    pub async fn fetch(&self, filters: &F) -> Result<PaginatedResponse<T>, ApiError> {
        self.api.get(self.path, filters).await
    }

    /// Fetches again every time `filters` changes. See [`watch_query`] for the
    /// ordering rules when filter changes overlap.
    pub fn watch(&self, filters: watch::Receiver<F>) -> watch::Receiver<FetchState<PaginatedResponse<T>>> {
        let client = self.clone();
        watch_query(filters, move |filters: F| {
            let client = client.clone();
            async move { client.fetch(&filters).await }
        })
    }
}
