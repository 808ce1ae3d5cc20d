//! Host position lookup for "use my location".
//!
//! A missing capability is modelled by the caller holding no [`Geolocator`]
//! at all; see [`geolocator_from_config`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    config::{Config, LocationMode},
    error::LocationError,
    model::Coordinates,
};

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    /// One-shot position query.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Approximate position from the public IP address (ip-api.com response format).
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    lookup_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn new(lookup_url: impl Into<String>) -> Self {
        Self { lookup_url: lookup_url.into(), http: Client::new() }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!(url = %self.lookup_url, "looking up position from IP address");

        let res = self
            .http
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "lookup service returned status {status}"
            )));
        }

        let body: IpLookupResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if body.status != "success" {
            return Err(LocationError::Denied(
                body.message.unwrap_or_else(|| "lookup refused".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                "lookup response had no coordinates".to_string(),
            )),
        }
    }
}

/// Build the geolocator selected by `[location] mode`, or `None` when the
/// capability is disabled or fixed coordinates are incomplete.
pub fn geolocator_from_config(config: &Config) -> Option<Box<dyn Geolocator>> {
    match config.location.mode {
        LocationMode::Ip => Some(Box::new(IpGeolocator::new(config.location.lookup_url.clone()))),
        LocationMode::Fixed => match config.fixed_coordinates() {
            Some(coords) => Some(Box::new(FixedLocation(coords))),
            None => {
                tracing::warn!("location mode is `fixed` but latitude/longitude are not both set");
                None
            }
        },
        LocationMode::Disabled => None,
    }
}
