//! HTTP client for the Mapbox Isochrone and Geocoding APIs.
//!
//! Wraps `reqwest` with credential handling and typed deserialization. The
//! isochrone response is already the canonical feature-collection shape and
//! is returned without reshaping.

use std::time::Duration;

use geojson::FeatureCollection;
use reqwest::{Client, Url};

use isoreach_core::{Location, TravelMode};

use crate::error::ProviderError;
use crate::types::GeocodeResponse;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";

/// Client for the Mapbox Isochrone (walking/driving) and forward-geocoding
/// endpoints.
///
/// The access token is optional at construction and only checked when a
/// request is issued, so a deployment without the credential starts up and
/// fails per-request instead. Use [`MapboxClient::with_base_url`] to point
/// at a mock server in tests.
pub struct MapboxClient {
    client: Client,
    access_token: Option<String>,
    base_url: Url,
}

impl MapboxClient {
    /// Creates a client pointed at the production Mapbox API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(access_token: Option<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::Configuration`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        access_token: Option<String>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("isoreach/0.1 (reachability-map)")
            .build()?;

        // Ensure the base URL ends with exactly one slash so joins append to
        // the path rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            ProviderError::Configuration(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            access_token,
            base_url,
        })
    }

    /// Fetches a travel-time isochrone for a walking or driving profile.
    ///
    /// Issues one GET request naming the profile, the coordinate pair, the
    /// contour in minutes, and the polygon-output flag, and returns the
    /// provider's feature collection unmodified.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::UnsupportedMode`] for any mode other than
    ///   walking/driving (checked first).
    /// - [`ProviderError::Configuration`] when the access token is absent;
    ///   no network call is made.
    /// - [`ProviderError::UpstreamStatus`] on a non-success HTTP status.
    /// - [`ProviderError::Http`] on transport failure.
    /// - [`ProviderError::Deserialize`] if the body is not a well-formed
    ///   feature collection.
    pub async fn fetch_isochrone(
        &self,
        location: &Location,
        time_minutes: u32,
        mode: TravelMode,
    ) -> Result<FeatureCollection, ProviderError> {
        if !mode.supports_road_profile() {
            return Err(ProviderError::UnsupportedMode(mode));
        }
        let token = self.require_token()?;

        let mut url = self.isochrone_url(location, mode)?;
        url.query_pairs_mut()
            .append_pair("contours_minutes", &time_minutes.to_string())
            .append_pair("polygons", "true")
            .append_pair("access_token", token);

        let body = self
            .request_json(url, &format!("isochrone({mode}, {time_minutes}min)"))
            .await?;
        Ok(body)
    }

    /// Forward-geocodes an address query. The first match wins.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Configuration`] when the access token is absent.
    /// - [`ProviderError::UpstreamStatus`] / [`ProviderError::Http`] /
    ///   [`ProviderError::Deserialize`] as for isochrone requests.
    /// - [`ProviderError::Geocoding`] when the query matches nothing.
    pub async fn geocode(&self, query: &str) -> Result<Location, ProviderError> {
        let token = self.require_token()?;

        let mut url = self.geocode_url(query)?;
        url.query_pairs_mut().append_pair("access_token", token);

        let response: GeocodeResponse = self
            .request_json(url, &format!("geocode({query})"))
            .await?;

        let Some(first) = response.features.into_iter().next() else {
            return Err(ProviderError::Geocoding(format!(
                "no matches for '{query}'"
            )));
        };
        let [lng, lat] = first.center;
        Ok(Location::with_address(lat, lng, first.place_name))
    }

    /// Whether a credential is present. Presence only; nothing is validated
    /// against the provider.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }

    fn require_token(&self) -> Result<&str, ProviderError> {
        self.access_token.as_deref().ok_or_else(|| {
            ProviderError::Configuration("Mapbox access token not configured".to_string())
        })
    }

    /// Builds the isochrone request path. Mapbox orders coordinates as
    /// `{lng},{lat}`.
    fn isochrone_url(&self, location: &Location, mode: TravelMode) -> Result<Url, ProviderError> {
        self.base_url
            .join(&format!(
                "isochrone/v1/mapbox/{mode}/{},{}",
                location.longitude, location.latitude
            ))
            .map_err(|e| ProviderError::Configuration(format!("invalid isochrone URL: {e}")))
    }

    /// Builds the geocoding request path with the query percent-encoded as a
    /// path segment.
    fn geocode_url(&self, query: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ProviderError::Configuration("base URL cannot be a base".to_string())
            })?;
            segments.pop_if_empty();
            segments.extend(["geocoding", "v5", "mapbox.places"]);
            segments.push(&format!("{query}.json"));
        }
        Ok(url)
    }

    /// Sends a GET request, maps non-success statuses to
    /// [`ProviderError::UpstreamStatus`], and parses the body.
    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, ProviderError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, context, "mapbox request failed");
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}
