//! HTTP clients for the external isochrone and geocoding providers.
//!
//! Two upstreams with different schemas feed one canonical shape: a GeoJSON
//! feature collection whose features carry polygon geometry and
//! `{ contour, color }` properties. The road-network provider (Mapbox)
//! returns that shape natively and is passed through untouched; the transit
//! provider (OpenRouteService) is reshaped by [`normalize_transit_response`].

mod error;
mod mapbox;
mod normalize;
mod ors;
mod types;

pub use error::ProviderError;
pub use mapbox::MapboxClient;
pub use normalize::normalize_transit_response;
pub use ors::TransitClient;
pub use types::{GeocodeFeature, GeocodeResponse, OrsFeature, OrsIsochroneResponse, OrsProperties};
