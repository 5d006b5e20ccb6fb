use axum::{extract::State, Extension, Json};
use geojson::FeatureCollection;
use serde::Deserialize;

use isoreach_core::{IsochroneRequest, Location, TravelMode};

use crate::middleware::RequestId;

use super::{map_provider_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct IsochroneBody {
    lat: f64,
    lng: f64,
    time: u32,
    mode: String,
}

/// `POST /isochrone` — walking/driving isochrones, proxied to the
/// road-network provider. The 200 body is the provider's feature collection,
/// passed through verbatim.
pub(super) async fn fetch_isochrone(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<IsochroneBody>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let mode = match body.mode.as_str() {
        "walking" => TravelMode::Walking,
        "driving" => TravelMode::Driving,
        other => {
            return Err(ApiError::new(
                req_id.0,
                "bad_request",
                format!("isochrone endpoint only supports walking and driving modes, got '{other}'"),
            ));
        }
    };

    let request = IsochroneRequest {
        location: Location::new(body.lat, body.lng),
        time_minutes: body.time,
        mode,
    };
    request
        .validate()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let collection = state
        .mapbox
        .fetch_isochrone(&request.location, request.time_minutes, request.mode)
        .await
        .map_err(|e| map_provider_error(req_id.0, &e))?;

    Ok(Json(collection))
}
