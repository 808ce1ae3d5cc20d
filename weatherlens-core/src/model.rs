use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// The most recent provider response, kept exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub body: Value,
    pub received_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(body: Value) -> Self {
        Self { body, received_at: Utc::now() }
    }

    /// City name reported by the provider, if the body carries one.
    pub fn city_name(&self) -> Option<&str> {
        self.body.get("name").and_then(Value::as_str)
    }

    /// Typed view over the fields the weather card shows.
    pub fn report(&self) -> Result<WeatherReport, serde_json::Error> {
        let raw = OwCurrent::deserialize(&self.body)?;

        let first = raw.weather.first();
        let condition = first
            .and_then(|w| w.main.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let description = first
            .and_then(|w| w.description.clone())
            .unwrap_or_else(|| condition.to_lowercase());

        Ok(WeatherReport {
            location_name: raw.name,
            country: raw.sys.and_then(|s| s.country),
            condition,
            description,
            icon: first.and_then(|w| w.icon.clone()),
            temperature_f: raw.main.temp,
            feels_like_f: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            wind_speed_mph: raw.wind.map(|w| w.speed).unwrap_or_default(),
            observation_time: raw.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }
}

/// Display-ready fields extracted from a snapshot. Temperatures are in °F,
/// as the provider returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub country: Option<String>,
    pub condition: String,
    pub description: String,
    pub icon: Option<String>,
    pub temperature_f: f64,
    pub feels_like_f: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_mph: f64,
    pub observation_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    sys: Option<OwSys>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_york() -> Value {
        json!({
            "name": "New York",
            "dt": 1_700_000_000,
            "sys": { "country": "US" },
            "weather": [{ "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
            "main": { "temp": 51.8, "feels_like": 49.3, "humidity": 62, "pressure": 1017 },
            "wind": { "speed": 9.22 }
        })
    }

    #[test]
    fn report_extracts_card_fields() {
        let snapshot = WeatherSnapshot::new(new_york());
        let report = snapshot.report().expect("body should parse");

        assert_eq!(report.location_name, "New York");
        assert_eq!(report.country.as_deref(), Some("US"));
        assert_eq!(report.condition, "Clouds");
        assert_eq!(report.description, "broken clouds");
        assert_eq!(report.icon.as_deref(), Some("04d"));
        assert_eq!(report.humidity_pct, 62);
        assert_eq!(report.pressure_hpa, 1017.0);
        assert_eq!(report.wind_speed_mph, 9.22);
        assert_eq!(
            report.observation_time,
            DateTime::from_timestamp(1_700_000_000, 0)
        );
    }

    #[test]
    fn report_tolerates_missing_optional_sections() {
        let snapshot = WeatherSnapshot::new(json!({
            "name": "Nowhere",
            "main": { "temp": 32.0, "feels_like": 30.0, "humidity": 10, "pressure": 1000 }
        }));
        let report = snapshot.report().expect("minimal body should parse");

        assert_eq!(report.condition, "Unknown");
        assert!(report.icon.is_none());
        assert!(report.country.is_none());
        assert_eq!(report.wind_speed_mph, 0.0);
    }

    #[test]
    fn report_fails_without_main_block() {
        let snapshot = WeatherSnapshot::new(json!({ "name": "Broken" }));
        assert!(snapshot.report().is_err());
    }

    #[test]
    fn city_name_reads_name_field() {
        assert_eq!(WeatherSnapshot::new(new_york()).city_name(), Some("New York"));
        assert_eq!(WeatherSnapshot::new(json!({ "cod": 200 })).city_name(), None);
    }
}
