//! HTTP client for the OpenRouteService public-transport isochrone API.

use std::time::Duration;

use geojson::FeatureCollection;
use reqwest::{header::AUTHORIZATION, Client, Url};
use serde::Serialize;

use isoreach_core::Location;

use crate::error::ProviderError;
use crate::normalize::normalize_transit_response;
use crate::types::OrsIsochroneResponse;

const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org/";

const ISOCHRONES_PATH: &str = "v2/isochrones/public-transport";

/// Request body for the OpenRouteService isochrone endpoint. Coordinates are
/// `[lng, lat]` pairs and the range is expressed in seconds.
#[derive(Debug, Serialize)]
struct OrsIsochroneRequest {
    locations: Vec<[f64; 2]>,
    range: Vec<u32>,
    range_type: &'static str,
}

/// Client for transit isochrones.
///
/// Holds its own (distinct) credential; like [`crate::MapboxClient`], the
/// key is only checked when a request is issued.
pub struct TransitClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl TransitClient {
    /// Creates a client pointed at the production OpenRouteService API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::Configuration`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: Option<String>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("isoreach/0.1 (reachability-map)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            ProviderError::Configuration(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Whether a credential is present. Presence only; nothing is validated
    /// against the provider.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches a transit isochrone and reshapes it into the canonical
    /// feature-collection form.
    ///
    /// The time budget is converted to seconds for the upstream request;
    /// afterwards every returned feature is rewritten to carry
    /// `{ contour: time_minutes, color: <transit color> }` so the result is
    /// structurally identical to the road-network provider's output.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Configuration`] when the API key is absent; no
    ///   network call is made.
    /// - [`ProviderError::UpstreamStatus`] on a non-success HTTP status.
    /// - [`ProviderError::Http`] on transport failure.
    /// - [`ProviderError::Deserialize`] if the body does not match the
    ///   upstream schema.
    pub async fn fetch_isochrone(
        &self,
        location: &Location,
        time_minutes: u32,
    ) -> Result<FeatureCollection, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Configuration("OpenRouteService API key not configured".to_string())
        })?;

        let url = self.base_url.join(ISOCHRONES_PATH).map_err(|e| {
            ProviderError::Configuration(format!("invalid isochrone URL: {e}"))
        })?;
        let request = OrsIsochroneRequest {
            locations: vec![[location.longitude, location.latitude]],
            range: vec![time_minutes * 60],
            range_type: "time",
        };

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, time_minutes, "transit isochrone request failed");
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let upstream: OrsIsochroneResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
                context: format!("transit isochrone({time_minutes}min)"),
                source: e,
            })?;

        Ok(normalize_transit_response(upstream, time_minutes))
    }
}
