use chrono::Local;
use weatherlens_core::{WeatherState, icon_url};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Terminal palette chosen by the dark-mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::Dark } else { Self::Light }
    }

    fn text(&self) -> &'static str {
        match self {
            Theme::Light => "\x1b[30;107m",
            Theme::Dark => "\x1b[97;40m",
        }
    }

    fn accent(&self) -> &'static str {
        match self {
            Theme::Light => "\x1b[34m",
            Theme::Dark => "\x1b[96m",
        }
    }

    fn muted(&self) -> &'static str {
        match self {
            Theme::Light => "\x1b[90m",
            Theme::Dark => "\x1b[37m",
        }
    }

    fn error(&self) -> &'static str {
        "\x1b[31m"
    }
}

/// Text for the current state: error banner, loading line, or weather card.
pub fn render(state: &WeatherState, icon_base_url: &str) -> String {
    let theme = Theme::from_dark_mode(state.preferences.dark_mode);
    let mut out = String::new();

    if let Some(error) = &state.error {
        out.push_str(&format!("{}{}! {error}{RESET}\n", theme.text(), theme.error()));
    }

    if state.loading {
        out.push_str(&format!("{}{}Loading...{RESET}\n", theme.text(), theme.muted()));
        return out;
    }

    let Some(snapshot) = &state.snapshot else {
        return out;
    };

    let report = match snapshot.report() {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(error = %err, "snapshot is missing fields the card needs");
            out.push_str(&format!(
                "{}Weather data for {} could not be displayed.{RESET}\n",
                theme.text(),
                state.city
            ));
            return out;
        }
    };

    let unit = state.unit();
    let symbol = unit.symbol();
    let heading = match &report.country {
        Some(country) => format!("{}, {country}", report.location_name),
        None => report.location_name.clone(),
    };

    let line = |label: &str, value: String| {
        format!("{}{}{label:<12}{RESET}{}{value}{RESET}\n", theme.text(), theme.muted(), theme.text())
    };

    out.push_str(&format!("{}{}{BOLD}{heading}{RESET}\n", theme.text(), theme.accent()));
    out.push_str(&format!("{}{}{}{RESET}\n", theme.text(), theme.muted(), report.description));
    out.push_str(&format!(
        "{}{BOLD}{}{symbol}{RESET}\n",
        theme.text(),
        unit.display(report.temperature_f)
    ));
    if let Some(code) = &report.icon {
        out.push_str(&line("Icon", icon_url(icon_base_url, code)));
    }
    out.push_str(&line("Feels like", format!("{}{symbol}", unit.display(report.feels_like_f))));
    out.push_str(&line("Humidity", format!("{}%", report.humidity_pct)));
    out.push_str(&line("Wind", format!("{} mph", report.wind_speed_mph)));
    out.push_str(&line("Pressure", format!("{} hPa", report.pressure_hpa)));
    if let Some(observed) = report.observation_time {
        out.push_str(&line(
            "Observed",
            observed.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        ));
    }

    out
}
