//! Core library for the `weatherlens` current-weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The RapidAPI weather client and host geolocation
//! - The weather snapshot model and display helpers
//! - Session state driven by user actions
//!
//! It is used by `weatherlens-cli`, but can also back other front-ends.

pub mod config;
pub mod error;
pub mod geolocation;
pub mod icon;
pub mod messages;
pub mod model;
pub mod provider;
pub mod session;
pub mod units;

pub use config::{Config, LocationMode};
pub use error::{FetchError, LocationError};
pub use geolocation::{FixedLocation, Geolocator, IpGeolocator, geolocator_from_config};
pub use icon::icon_url;
pub use model::{Coordinates, WeatherReport, WeatherSnapshot};
pub use provider::{RapidApiProvider, WeatherProvider, provider_from_config};
pub use session::{Preferences, WeatherSession, WeatherState};
pub use units::{TemperatureUnit, display_temp};
