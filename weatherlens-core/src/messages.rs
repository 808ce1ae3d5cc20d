//! Fixed user-facing error messages. Technical detail goes to the log only.

pub const CITY_NOT_FOUND: &str = "Could not find weather for that city.";
pub const LOCATION_WEATHER_NOT_FOUND: &str = "Could not find weather for your location.";
pub const LOCATION_DENIED: &str = "Location access denied. Please enable location services.";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported on this system.";
