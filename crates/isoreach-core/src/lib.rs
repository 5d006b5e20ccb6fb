//! Core domain types and configuration for isoreach.
//!
//! Everything here is provider-agnostic: travel modes and their display
//! colors, locations, validated isochrone requests, committed records, and
//! the environment-driven [`AppConfig`].

mod config;
mod types;

pub use config::{load_app_config, load_app_config_from_env, AppConfig, ConfigError};
pub use types::{
    IsochroneRecord, IsochroneRequest, Location, RequestError, TravelMode, DEFAULT_CENTER,
    DEFAULT_ZOOM, MAX_TIME_MINUTES, MIN_TIME_MINUTES,
};
