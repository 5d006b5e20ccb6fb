use isoreach_core::TravelMode;
use thiserror::Error;

/// Errors returned by the provider clients.
///
/// None of these are retried automatically; the user reissues the action.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The credential for the targeted provider is not configured. Checked
    /// before any network I/O; fatal to the single request, not the session.
    #[error("provider not configured: {0}")]
    Configuration(String),

    /// The request named a mode this provider cannot serve.
    #[error("unsupported travel mode for this provider: {0}")]
    UnsupportedMode(TravelMode),

    /// The provider answered with a non-success HTTP status.
    #[error("upstream provider returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("malformed upstream response for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered successfully but returned no usable geometry.
    #[error("provider returned no isochrone geometry")]
    EmptyResult,

    /// Address search failed or matched nothing.
    #[error("geocoding failed: {0}")]
    Geocoding(String),
}
