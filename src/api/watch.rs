//! Re-fetching a resource whenever its parameters change.
//!
//! A source `watch::Receiver` carries the current parameters (a filter, a station
//! id...). Each distinct value it emits triggers exactly one request. Requests are
//! never cancelled: when several are in flight, the state ends up reflecting the one
//! that *resolved* last, not the one issued last. Callers needing issue order must
//! debounce upstream.

use crate::api::error::ApiError;
use futures_util::future::{BoxFuture, FutureExt};
use log::debug;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of a reactive request: the latest payload or error, and whether any
/// request is still outstanding.
#[derive(Debug)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub pending: bool,
    pub error: Option<Arc<ApiError>>,
    in_flight: usize,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            pending: false,
            error: None,
            in_flight: 0,
        }
    }
}

impl<T: Clone> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            pending: self.pending,
            error: self.error.clone(),
            in_flight: self.in_flight,
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        !self.pending && self.data.is_none() && self.error.is_none()
    }

    fn issue(&mut self) {
        self.in_flight += 1;
        self.pending = true;
    }

    /// A success replaces the data and clears the error; a failure clears the data.
    fn resolve(&mut self, result: Result<T, ApiError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.pending = self.in_flight > 0;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                self.data = None;
                self.error = Some(Arc::new(e));
            }
        }
    }
}

impl<T> From<Result<T, ApiError>> for FetchState<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        let mut state = FetchState::default();
        state.issue();
        state.resolve(result);
        state
    }
}

type Fetcher<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// Drives `fetch` from the values of `source` and publishes the outcome.
///
/// The current value of `source` is fetched immediately. The driver stops listening
/// once `source`'s sender is dropped; requests already issued still complete and
/// update the state.
pub fn watch_query<K, T, F, Fut>(
    mut source: watch::Receiver<K>,
    fetch: F,
) -> watch::Receiver<FetchState<T>>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let fetch: Fetcher<K, T> = Arc::new(move |key| fetch(key).boxed());
    let (state_tx, state_rx) = watch::channel(FetchState::default());
    let state_tx = Arc::new(state_tx);

    tokio::spawn(async move {
        let mut last_issued: Option<K> = None;
        loop {
            let key = source.borrow_and_update().clone();
            if last_issued.as_ref() != Some(&key) {
                dispatch(&fetch, &state_tx, key.clone());
                last_issued = Some(key);
            } else {
                debug!("Parameters unchanged, not issuing a request");
            }
            if source.changed().await.is_err() {
                break;
            }
        }
    });

    state_rx
}

fn dispatch<K, T>(fetch: &Fetcher<K, T>, state_tx: &Arc<watch::Sender<FetchState<T>>>, key: K)
where
    K: Send + 'static,
    T: Send + Sync + 'static,
{
    state_tx.send_modify(FetchState::issue);
    let request = fetch(key);
    let state_tx = Arc::clone(state_tx);
    tokio::spawn(async move {
        let result = request.await;
        state_tx.send_modify(|state| state.resolve(result));
    });
}

/// Waits until `state` satisfies `predicate` and returns a copy of that snapshot.
pub async fn wait_for<T, P>(state: &mut watch::Receiver<FetchState<T>>, predicate: P) -> FetchState<T>
where
    T: Clone,
    P: FnMut(&FetchState<T>) -> bool,
{
    let snapshot = match state.wait_for(predicate).await {
        Ok(snapshot) => Some(snapshot.clone()),
        Err(_) => None,
    };
    // sender gone: the last published state is final
    snapshot.unwrap_or_else(|| state.borrow().clone())
}
