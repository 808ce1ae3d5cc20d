use crate::{Config, Coordinates, WeatherSnapshot, error::FetchError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod rapidapi;

pub use rapidapi::RapidApiProvider;

/// Source of current-weather snapshots.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    async fn fetch_by_coords(&self, coords: Coordinates) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the provider described by `config.api`.
pub fn provider_from_config(config: &Config) -> RapidApiProvider {
    if !config.has_credentials() {
        tracing::warn!(
            "No RapidAPI credentials configured; requests will likely be rejected. \
             Run `weatherlens configure` or set RAPIDAPI_KEY / RAPIDAPI_HOST."
        );
    }

    RapidApiProvider::new(config.api.clone())
}
