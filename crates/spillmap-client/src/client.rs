//! HTTP client for the spill report server's JSON endpoints.
//!
//! Wraps `reqwest` with base-URL handling, the `{"data": ...}` envelope and
//! the server's `{"msg": ...}` failure bodies, which surface as
//! [`ApiError::Rejected`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use spillmap_core::{AppConfig, LatLng, Report};

use crate::api::SpillApi;
use crate::error::ApiError;
use crate::types::{
    CheckCoordinatesRequest, CheckedCoordinates, ConvertedCoordinates, DataEnvelope,
    ErrorEnvelope, MapSearchRequest,
};

pub const LATLON_TO_COORDS_PATH: &str = "geo/latlon_to_coords";
pub const CHK_COORDINATES_PATH: &str = "geo/chk_coordinates";
pub const MAP_SEARCH_PATH: &str = "report/map_search";
pub const RENDER_MAP_SAMPLES_PATH: &str = "report/render_map_samples";

const DEFAULT_USER_AGENT: &str = "spillmap/0.1 (spill-report-map)";

/// Client for the spill report server.
///
/// Use [`SpillClient::from_config`] in the binary and [`SpillClient::new`]
/// to point at a mock server in tests.
pub struct SpillClient {
    client: Client,
    base_url: Url,
}

impl SpillClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint paths join under any prefix
        // the app is mounted at instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`SpillClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let user_agent = if config.user_agent.is_empty() {
            DEFAULT_USER_AGENT
        } else {
            config.user_agent.as_str()
        };
        Self::new(&config.base_url, config.request_timeout_secs, user_agent)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    /// POSTs `body` as JSON and unwraps the `data` field of the response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`] on a non-2xx response carrying a `msg`.
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body does not match `T`.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "posting to spill report server");

        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let envelope: ErrorEnvelope = serde_json::from_str(&text).unwrap_or_default();
            return Err(match envelope.msg {
                Some(message) => ApiError::Rejected {
                    endpoint: path.to_string(),
                    message,
                },
                None => ApiError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                },
            });
        }

        let envelope: DataEnvelope<T> =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize {
                context: path.to_string(),
                source: e,
            })?;
        Ok(envelope.data)
    }
}

impl SpillApi for SpillClient {
    async fn latlon_to_coords(&self, position: LatLng) -> Result<ConvertedCoordinates, ApiError> {
        self.post_json(LATLON_TO_COORDS_PATH, &position).await
    }

    async fn check_coordinates(
        &self,
        request: &CheckCoordinatesRequest,
    ) -> Result<CheckedCoordinates, ApiError> {
        self.post_json(CHK_COORDINATES_PATH, request).await
    }

    async fn map_search(&self, request: &MapSearchRequest) -> Result<Vec<Report>, ApiError> {
        let reports: Vec<Report> = self.post_json(MAP_SEARCH_PATH, request).await?;
        tracing::debug!(count = reports.len(), "map search returned reports");
        Ok(reports)
    }

    async fn render_map_samples(&self, reports: &[Report]) -> Result<String, ApiError> {
        self.post_json(RENDER_MAP_SAMPLES_PATH, reports).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
