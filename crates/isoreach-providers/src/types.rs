//! Upstream response schemas that differ from the canonical shape.
//!
//! The road-network provider already answers with a canonical GeoJSON
//! feature collection and needs no types of its own; only the transit and
//! geocoding upstreams carry distinct schemas worth naming.

use serde::Deserialize;

/// OpenRouteService isochrone response: a feature collection whose features
/// carry `value` (the range bound in seconds) instead of the
/// `{ contour, color }` properties the client expects.
#[derive(Debug, Deserialize)]
pub struct OrsIsochroneResponse {
    pub features: Vec<OrsFeature>,
}

#[derive(Debug, Deserialize)]
pub struct OrsFeature {
    pub geometry: geojson::Geometry,
    #[serde(default)]
    pub properties: OrsProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrsProperties {
    /// Range bound in seconds. Informational only; the normalization step
    /// replaces it with the requested contour in minutes.
    pub value: Option<f64>,
}

/// Mapbox forward-geocoding response. Only the fields the search flow
/// consumes: `center` is `[lng, lat]`, first feature wins.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    pub center: [f64; 2],
    pub place_name: String,
}
