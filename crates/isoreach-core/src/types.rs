use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default map center: Tokyo Station, as (latitude, longitude).
pub const DEFAULT_CENTER: (f64, f64) = (35.6812, 139.7671);

/// Default map zoom level.
pub const DEFAULT_ZOOM: u8 = 11;

/// Smallest accepted travel-time budget, in minutes.
pub const MIN_TIME_MINUTES: u32 = 1;

/// Largest accepted travel-time budget, in minutes.
pub const MAX_TIME_MINUTES: u32 = 120;

/// A point on the map, optionally carrying the geocoded address that
/// produced it. Map clicks yield address-less locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
        }
    }

    #[must_use]
    pub fn with_address(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: Some(address.into()),
        }
    }

    fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Transport mode for an isochrone query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Driving,
    Transit,
}

impl TravelMode {
    /// Display color used for this mode's polygons.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            TravelMode::Walking => "#10B981",
            TravelMode::Driving => "#3B82F6",
            TravelMode::Transit => "#8B5CF6",
        }
    }

    /// Whether the road-network isochrone provider can serve this mode.
    /// Transit goes through a separate provider.
    #[must_use]
    pub fn supports_road_profile(self) -> bool {
        matches!(self, TravelMode::Walking | TravelMode::Driving)
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelMode::Walking => write!(f, "walking"),
            TravelMode::Driving => write!(f, "driving"),
            TravelMode::Transit => write!(f, "transit"),
        }
    }
}

/// A validated user request for one isochrone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneRequest {
    pub location: Location,
    pub time_minutes: u32,
    pub mode: TravelMode,
}

impl IsochroneRequest {
    /// Checks the request against the accepted ranges before dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::TimeOutOfRange`] when the travel time lies
    /// outside [`MIN_TIME_MINUTES`]..=[`MAX_TIME_MINUTES`], or
    /// [`RequestError::InvalidCoordinates`] for non-finite or out-of-range
    /// coordinates.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(MIN_TIME_MINUTES..=MAX_TIME_MINUTES).contains(&self.time_minutes) {
            return Err(RequestError::TimeOutOfRange(self.time_minutes));
        }
        if !self.location.is_valid() {
            return Err(RequestError::InvalidCoordinates {
                latitude: self.location.latitude,
                longitude: self.location.longitude,
            });
        }
        Ok(())
    }
}

/// Validation failures for an [`IsochroneRequest`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("travel time must be between {MIN_TIME_MINUTES} and {MAX_TIME_MINUTES} minutes, got {0}")]
    TimeOutOfRange(u32),

    #[error("invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// One committed isochrone in the session's working set.
///
/// Records are created only when a provider call succeeds and are never
/// mutated afterwards; `id` names the map layers drawn for the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsochroneRecord {
    pub id: String,
    pub request: IsochroneRequest,
    pub geometry: geojson::Geometry,
    pub color: String,
}
