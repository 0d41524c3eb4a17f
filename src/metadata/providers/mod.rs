//! Concrete provider adapter implementations.
//!
//! Each submodule wraps a single upstream API and implements the
//! [`ProviderAdapter`](super::ProviderAdapter) trait. Both share
//! [`HttpFetcher`] for the request itself.

pub mod kinopoisk_dev;
pub mod kinopoisk_unofficial;

pub use kinopoisk_dev::KinopoiskDevProvider;
pub use kinopoisk_unofficial::KinopoiskUnofficialProvider;

use std::time::Duration;

use movie_url_common::{Error, ProviderChoice, Result};
use reqwest::Client;
use tracing::debug;

use super::ProviderAdapter;
use crate::config::EndpointConfig;

/// Create the adapter selected by `choice`.
pub fn create_provider(
    choice: ProviderChoice,
    endpoint: &EndpointConfig,
    token: &str,
    timeout: Option<Duration>,
) -> Box<dyn ProviderAdapter> {
    let http = HttpFetcher::new(endpoint, token, timeout);
    match choice {
        ProviderChoice::Primary => Box::new(KinopoiskDevProvider::new(http)),
        ProviderChoice::Legacy => Box::new(KinopoiskUnofficialProvider::new(http)),
    }
}

/// Single-GET HTTP access shared by the adapters.
pub struct HttpFetcher {
    client: Client,
    endpoint: EndpointConfig,
    token: String,
}

impl HttpFetcher {
    pub fn new(endpoint: &EndpointConfig, token: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client with timeout: {}", e);
            Client::new()
        });

        Self {
            client,
            endpoint: endpoint.clone(),
            token: token.to_string(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn url(&self, identifier: &str) -> String {
        self.endpoint.url_for(identifier)
    }

    /// GET the endpoint for `identifier` and return status and body.
    ///
    /// Returns `Ok(None)` without touching the network when the token is
    /// empty.
    pub async fn get(&self, identifier: &str) -> Result<Option<(u16, String)>> {
        if !self.has_token() {
            return Ok(None);
        }

        let url = self.url(identifier);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .header(self.endpoint.auth_header.as_str(), &self.token)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        debug!(url = %url, status, bytes = body.len(), "response");
        Ok(Some((status, body)))
    }
}
