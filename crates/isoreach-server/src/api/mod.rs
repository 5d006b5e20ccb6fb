mod geocode;
mod isochrone;
mod transit;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use isoreach_providers::{MapboxClient, ProviderError, TransitClient};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub mapbox: Arc<MapboxClient>,
    pub transit: Arc<TransitClient>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    road_isochrones: &'static str,
    transit_isochrones: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a provider failure onto the endpoint contract: unsupported mode is
/// the caller's fault (400), a missing match is 404, everything else —
/// missing credential, upstream status, transport, malformed body — is 500.
pub(super) fn map_provider_error(request_id: String, error: &ProviderError) -> ApiError {
    match error {
        ProviderError::UnsupportedMode(mode) => ApiError::new(
            request_id,
            "bad_request",
            format!("this endpoint does not serve '{mode}' requests"),
        ),
        ProviderError::Geocoding(message) => {
            ApiError::new(request_id, "not_found", message.clone())
        }
        ProviderError::Configuration(message) => {
            tracing::error!(error = %error, "provider credential missing");
            ApiError::new(request_id, "configuration_error", message.clone())
        }
        other => {
            tracing::error!(error = %other, "provider request failed");
            ApiError::new(request_id, "upstream_error", other.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/isochrone", post(isochrone::fetch_isochrone))
        .route("/public-transit", post(transit::fetch_transit_isochrone))
        .route("/geocode", post(geocode::geocode_address))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let configured = |flag: bool| if flag { "configured" } else { "missing" };
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            road_isochrones: configured(state.mapbox.is_configured()),
            transit_isochrones: configured(state.transit.is_configured()),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
