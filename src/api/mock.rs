//! In-memory [`Transport`] for tests: answers from a closure, records every URL it
//! was asked for, and can hold a reply back until the test releases it.

use crate::api::error::TransportError;
use crate::api::transport::{HttpResponse, Transport};
use crate::{InfoClimat, Settings};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

pub(crate) enum Reply {
    Ready(HttpResponse),
    Failed(String),
    /// Resolves when the test sends on the paired `oneshot::Sender`.
    Gated(oneshot::Receiver<HttpResponse>),
}

impl From<HttpResponse> for Reply {
    fn from(response: HttpResponse) -> Self {
        Reply::Ready(response)
    }
}

type Handler = Box<dyn Fn(&Url) -> Reply + Send + Sync>;

pub(crate) struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<Url>>,
}

impl MockTransport {
    pub(crate) fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Url) -> Reply + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(message: &'static str) -> Arc<Self> {
        Self::new(move |_| Reply::Failed(message.to_string()))
    }

    pub(crate) fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Yields to the runtime until `count` requests have been issued.
    pub(crate) async fn wait_for_requests(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.request_count() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("timed out waiting for requests");
    }
}

/// An [`InfoClimat`] client on top of `mock`, with its synthetic series in a fresh
/// temporary directory that lives as long as the returned guard.
pub(crate) async fn test_client(mock: Arc<MockTransport>) -> (InfoClimat, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new("https://api.example.org/api/v1/")
        .with_synthetic_series_path(dir.path().join("national_indicator_synthetic.json"));
    let client = InfoClimat::with_transport(settings, mock).await.unwrap();
    (client, dir)
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.clone());
        match (self.handler)(&url) {
            Reply::Ready(response) => Ok(response),
            Reply::Failed(message) => Err(message.into()),
            Reply::Gated(rx) => rx.await.map_err(|_| "gate dropped".into()),
        }
    }
}
