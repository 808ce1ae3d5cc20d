use serde::{Deserialize, Serialize};

/// Unit the user wants temperatures shown in. Provider data is always °F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn from_celsius_flag(celsius: bool) -> Self {
        if celsius { Self::Celsius } else { Self::Fahrenheit }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "°F",
            Self::Celsius => "°C",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Fahrenheit => Self::Celsius,
            Self::Celsius => Self::Fahrenheit,
        }
    }

    /// Render a Fahrenheit reading in this unit.
    pub fn display(&self, fahrenheit: f64) -> i64 {
        display_temp(fahrenheit, *self == Self::Celsius)
    }
}

/// Rounded temperature for display; converts to Celsius when asked.
pub fn display_temp(fahrenheit: f64, celsius: bool) -> i64 {
    let value = if celsius {
        fahrenheit_to_celsius(fahrenheit)
    } else {
        fahrenheit
    };
    value.round() as i64
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * (5.0 / 9.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[f64] = &[-40.0, -3.7, 0.0, 31.5, 32.0, 50.0, 72.4, 98.6, 212.0, 451.49];

    #[test]
    fn fahrenheit_passes_through_rounded() {
        for &f in SAMPLES {
            assert_eq!(display_temp(f, false), f.round() as i64, "input {f}");
        }
    }

    #[test]
    fn celsius_uses_standard_formula() {
        for &f in SAMPLES {
            let expected = ((f - 32.0) * (5.0 / 9.0)).round() as i64;
            assert_eq!(display_temp(f, true), expected, "input {f}");
        }
    }

    #[test]
    fn well_known_points() {
        assert_eq!(display_temp(32.0, true), 0);
        assert_eq!(display_temp(212.0, true), 100);
        assert_eq!(display_temp(-40.0, true), -40);
        assert_eq!(display_temp(98.6, true), 37);
        assert_eq!(display_temp(72.5, false), 73);
    }

    #[test]
    fn unit_toggle_and_symbol() {
        let unit = TemperatureUnit::default();
        assert_eq!(unit.symbol(), "°F");
        assert_eq!(unit.toggled(), TemperatureUnit::Celsius);
        assert_eq!(unit.toggled().toggled(), unit);
        assert_eq!(TemperatureUnit::from_celsius_flag(true).display(212.0), 100);
    }
}
