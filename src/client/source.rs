//! Retrieval of raw RDB text
//!
//! The normalizer never performs I/O itself. Adapters hand a URL and a list
//! of parameter sets to an [`RdbSource`] and get one body back per set.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::NwisConfig;
use crate::error::Result;
use crate::models::QueryParams;

/// Fetches response bodies for an NWIS endpoint
#[async_trait]
pub trait RdbSource: Send + Sync {
    /// Retrieve one body per parameter set, in the same order as `params`
    async fn retrieve_text(&self, url: &str, params: &[QueryParams]) -> Result<Vec<String>>;
}

/// [`RdbSource`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    max_concurrent: usize,
}

impl HttpSource {
    pub fn new(config: &NwisConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_concurrent: config.max_concurrent_requests.max(1),
        })
    }

    async fn fetch(&self, url: &str, params: &QueryParams) -> Result<String> {
        let mut params = params.clone();
        if params.get("format").is_none() {
            params.insert("format", "rdb");
        }
        let query: Vec<(&str, &str)> = params.iter().collect();

        let mut response = self.client.get(url).query(&query).send().await?;
        let status = response.status();
        debug!("GET {} -> {}", response.url(), status);

        // NWIS answers "no data" with 404 and an RDB comment block; 503 bodies
        // go to the normalizer, which reports them as service errors.
        if status == StatusCode::NOT_FOUND || status == StatusCode::SERVICE_UNAVAILABLE {
            warn!("{} returned {}, passing body through", url, status);
        } else {
            response = response.error_for_status()?;
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RdbSource for HttpSource {
    async fn retrieve_text(&self, url: &str, params: &[QueryParams]) -> Result<Vec<String>> {
        // Futures are built up front so the returned future stays Send.
        let requests: Vec<_> = params.iter().map(|p| self.fetch(url, p)).collect();
        let bodies = stream::iter(requests)
            .buffered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        bodies.into_iter().collect()
    }
}
