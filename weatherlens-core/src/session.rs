//! In-memory weather state and the user actions that drive it.

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{FetchError, LocationError},
    geolocation::Geolocator,
    icon::icon_url,
    messages,
    model::{Coordinates, WeatherSnapshot},
    provider::WeatherProvider,
    units::{TemperatureUnit, display_temp},
};

/// User display toggles. Neither triggers a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub celsius: bool,
    pub dark_mode: bool,
}

/// Everything the view needs to render.
///
/// `loading`, `error` and `snapshot` are kept mutually exclusive by the
/// transitions below; nothing else enforces it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherState {
    pub snapshot: Option<WeatherSnapshot>,
    /// Name of the city currently shown, as last reported by the provider.
    pub city: String,
    pub loading: bool,
    pub error: Option<String>,
    pub preferences: Preferences,
}

impl WeatherState {
    pub fn new(city: impl Into<String>, preferences: Preferences) -> Self {
        Self {
            snapshot: None,
            city: city.into(),
            loading: false,
            error: None,
            preferences,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of a fetch. Failures clear the snapshot and show
    /// `failure_message`; the technical error is only logged.
    pub fn finish_fetch(
        &mut self,
        result: Result<WeatherSnapshot, FetchError>,
        failure_message: &str,
    ) {
        match result {
            Ok(snapshot) => {
                if let Some(name) = snapshot.city_name() {
                    self.city = name.to_string();
                }
                self.snapshot = Some(snapshot);
            }
            Err(err) => {
                tracing::error!(error = %err, "weather fetch failed");
                self.snapshot = None;
                self.error = Some(failure_message.to_string());
            }
        }
        self.loading = false;
    }

    pub fn location_failed(&mut self, err: &LocationError) {
        tracing::error!(error = %err, "could not determine current position");
        self.error = Some(messages::LOCATION_DENIED.to_string());
        self.loading = false;
    }

    pub fn unit(&self) -> TemperatureUnit {
        TemperatureUnit::from_celsius_flag(self.preferences.celsius)
    }

    /// Fahrenheit reading rounded in the currently selected unit.
    pub fn display_temp(&self, fahrenheit: f64) -> i64 {
        display_temp(fahrenheit, self.preferences.celsius)
    }
}

/// A provider plus the state its results land in.
#[derive(Debug)]
pub struct WeatherSession<P> {
    provider: P,
    state: WeatherState,
    default_city: String,
    icon_base_url: String,
}

impl<P: WeatherProvider> WeatherSession<P> {
    pub fn new(provider: P, config: &Config) -> Self {
        Self {
            provider,
            state: WeatherState::new(config.default_city.clone(), config.preferences()),
            default_city: config.default_city.clone(),
            icon_base_url: config.display.icon_base_url.clone(),
        }
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Startup fetch of the configured default city.
    pub async fn load_initial(&mut self) {
        let city = self.default_city.clone();
        self.fetch_by_city(&city).await;
    }

    /// Search-box submit. Blank input is ignored and returns `false`;
    /// otherwise the input is sent as typed.
    pub async fn search(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            return false;
        }
        self.fetch_by_city(input).await;
        true
    }

    pub async fn fetch_by_city(&mut self, city: &str) {
        self.state.begin_fetch();
        let result = self.provider.fetch_by_city(city).await;
        self.state.finish_fetch(result, messages::CITY_NOT_FOUND);
    }

    pub async fn fetch_by_coords(&mut self, coords: Coordinates) {
        self.state.begin_fetch();
        let result = self.provider.fetch_by_coords(coords).await;
        self.state
            .finish_fetch(result, messages::LOCATION_WEATHER_NOT_FOUND);
    }

    /// "Use my location". `None` means the host has no location capability.
    pub async fn use_location(&mut self, geolocator: Option<&dyn Geolocator>) {
        let Some(geolocator) = geolocator else {
            self.state.error = Some(messages::GEOLOCATION_UNSUPPORTED.to_string());
            return;
        };

        self.state.loading = true;
        match geolocator.current_position().await {
            Ok(coords) => self.fetch_by_coords(coords).await,
            Err(err) => self.state.location_failed(&err),
        }
    }

    pub fn toggle_units(&mut self) {
        self.state.preferences.celsius = !self.state.preferences.celsius;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.state.preferences.dark_mode = !self.state.preferences.dark_mode;
    }

    /// Icon URL for the current snapshot's condition, if it has one.
    pub fn icon_url(&self) -> Option<String> {
        let report = self.state.snapshot.as_ref()?.report().ok()?;
        report.icon.map(|code| icon_url(&self.icon_base_url, &code))
    }
}
