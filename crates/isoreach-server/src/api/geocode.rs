use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_provider_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeBody {
    query: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GeocodeResult {
    lat: f64,
    lng: f64,
    place_name: String,
}

/// `POST /geocode` — forward geocoding, first match wins. Zero matches is a
/// 404, never an empty 200.
pub(super) async fn geocode_address(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<GeocodeBody>,
) -> Result<Json<GeocodeResult>, ApiError> {
    let query = body.query.trim();
    if query.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query must not be empty",
        ));
    }

    let location = state
        .mapbox
        .geocode(query)
        .await
        .map_err(|e| map_provider_error(req_id.0, &e))?;

    Ok(Json(GeocodeResult {
        lat: location.latitude,
        lng: location.longitude,
        place_name: location.address.unwrap_or_default(),
    }))
}
