//! HTTP geocoding client.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use super::error::{GeocodeError, TransportError};
use super::response::parse_locations;
use crate::config::GeocoderConfig;
use crate::models::Location;

/// Forward geocoding client for an OpenCage-style endpoint.
///
/// Every call to [`GeocodeClient::search`] captures the client's current
/// cancellation token at call time. [`GeocodeClient::cancel`] fires that
/// token and installs a fresh one, so all calls made before it resolve as
/// cancelled while later calls are unaffected.
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    cancel_token: Mutex<CancellationToken>,
}

impl GeocodeClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            cancel_token: Mutex::new(CancellationToken::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `<base>?q=<query>&key=<api_key>`
    pub fn request_url(&self, query: &str, api_key: &str) -> Result<Url, GeocodeError> {
        let url = Url::parse_with_params(&self.base_url, &[("q", query), ("key", api_key)])?;
        Ok(url)
    }

    /// Geocode free text into locations.
    ///
    /// The request is bound to the current cancellation token before this
    /// returns, so a `cancel()` issued afterwards always reaches it, even if
    /// the future has not been polled yet.
    pub fn search(
        &self,
        query: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<Vec<Location>, GeocodeError>> + Send + 'static {
        let url = self.request_url(query, api_key);
        let token = self.token().clone();
        let client = self.client.clone();
        let query = query.to_string();

        send_request(client, url, token, query)
    }

    /// Abort every request issued so far on this client.
    pub fn cancel(&self) {
        let mut token = self.token();
        token.cancel();
        *token = CancellationToken::new();
    }

    fn token(&self) -> MutexGuard<'_, CancellationToken> {
        self.cancel_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

async fn send_request(
    client: Client,
    url: Result<Url, GeocodeError>,
    token: CancellationToken,
    query: String,
) -> Result<Vec<Location>, GeocodeError> {
    let url = url?;
    debug!("Geocoding request for {:?}", query);

    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("Geocoding request for {:?} cancelled", query);
            Err(TransportError::Cancelled.into())
        }
        result = fetch(&client, url) => result,
    }
}

async fn fetch(client: &Client, url: Url) -> Result<Vec<Location>, GeocodeError> {
    let response = client.get(url).send().await.map_err(|e| {
        let e = e.without_url();
        warn!("Geocoding transport error: {}", e);
        e
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!("Geocoder returned status {}", status);
        return Err(GeocodeError::UnexpectedHttpResponse(status));
    }

    let body = response.bytes().await?;
    let locations = parse_locations(&body);
    debug!("Geocoder returned {} locations", locations.len());

    Ok(locations)
}
