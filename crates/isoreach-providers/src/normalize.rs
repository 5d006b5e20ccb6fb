//! Normalization from the OpenRouteService schema to the canonical
//! feature-collection shape.
//!
//! This is the one real transform in the system: the transit upstream
//! returns geometries without the per-feature `{ contour, color }` metadata
//! the rest of the pipeline relies on, so every feature's properties are
//! rewritten while its geometry is preserved unchanged.

use geojson::{Feature, FeatureCollection, JsonObject};
use isoreach_core::TravelMode;

use crate::types::OrsIsochroneResponse;

/// Rewrites an OpenRouteService isochrone response into the canonical
/// shape: each feature keeps its geometry and gets
/// `properties = { contour: time_minutes, color: <transit color> }`,
/// regardless of whatever properties the upstream supplied.
#[must_use]
pub fn normalize_transit_response(
    response: OrsIsochroneResponse,
    time_minutes: u32,
) -> FeatureCollection {
    let features = response
        .features
        .into_iter()
        .map(|feature| Feature {
            bbox: None,
            geometry: Some(feature.geometry),
            id: None,
            properties: Some(transit_properties(time_minutes)),
            foreign_members: None,
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn transit_properties(time_minutes: u32) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert("contour".to_string(), time_minutes.into());
    properties.insert(
        "color".to_string(),
        TravelMode::Transit.color().to_string().into(),
    );
    properties
}

#[cfg(test)]
mod tests {
    use geojson::{Geometry, Value};

    use super::*;
    use crate::types::{OrsFeature, OrsProperties};

    fn square_polygon() -> Geometry {
        Geometry::new(Value::Polygon(vec![vec![
            vec![139.76, 35.68],
            vec![139.77, 35.68],
            vec![139.77, 35.69],
            vec![139.76, 35.68],
        ]]))
    }

    fn ors_response() -> OrsIsochroneResponse {
        OrsIsochroneResponse {
            features: vec![OrsFeature {
                geometry: square_polygon(),
                properties: OrsProperties {
                    value: Some(2700.0),
                },
            }],
        }
    }

    #[test]
    fn properties_are_rewritten_to_contour_and_color() {
        let collection = normalize_transit_response(ors_response(), 45);
        assert_eq!(collection.features.len(), 1);

        let properties = collection.features[0]
            .properties
            .as_ref()
            .expect("properties present");
        assert_eq!(properties.get("contour"), Some(&serde_json::json!(45)));
        assert_eq!(
            properties.get("color"),
            Some(&serde_json::json!("#8B5CF6"))
        );
        // The upstream `value` field must not leak through.
        assert!(properties.get("value").is_none());
    }

    #[test]
    fn geometry_is_preserved_unchanged() {
        let collection = normalize_transit_response(ors_response(), 30);
        let geometry = collection.features[0]
            .geometry
            .as_ref()
            .expect("geometry present");
        assert_eq!(*geometry, square_polygon());
    }

    #[test]
    fn empty_feature_list_stays_empty() {
        let collection =
            normalize_transit_response(OrsIsochroneResponse { features: vec![] }, 15);
        assert!(collection.features.is_empty());
    }

    #[test]
    fn every_feature_is_rewritten() {
        let response = OrsIsochroneResponse {
            features: vec![
                OrsFeature {
                    geometry: square_polygon(),
                    properties: OrsProperties { value: Some(900.0) },
                },
                OrsFeature {
                    geometry: square_polygon(),
                    properties: OrsProperties::default(),
                },
            ],
        };
        let collection = normalize_transit_response(response, 15);
        for feature in &collection.features {
            let properties = feature.properties.as_ref().expect("properties");
            assert_eq!(properties.get("contour"), Some(&serde_json::json!(15)));
        }
    }
}
