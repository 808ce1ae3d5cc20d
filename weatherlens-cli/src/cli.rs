use std::fmt;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use weatherlens_core::{
    Config, Coordinates, FixedLocation, Geolocator, RapidApiProvider, WeatherSession,
    geolocator_from_config, provider_from_config,
};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherlens", version, about = "Current weather for a city or your location")]
pub struct Cli {
    /// Show temperatures in Celsius instead of Fahrenheit.
    #[arg(long, global = true)]
    pub celsius: bool,

    /// Use the dark colour theme.
    #[arg(long, global = true)]
    pub dark: bool,

    /// Defaults to `show` for the configured city.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store RapidAPI credentials and the default city.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; the configured default city when absent.
        city: Option<String>,
    },

    /// Show current weather for your location.
    Locate {
        /// Latitude; skips the location lookup when given with --lon.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; skips the location lookup when given with --lat.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Search, locate and toggle display options from a menu.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { celsius, dark, command } = self;

        match command.unwrap_or(Command::Show { city: None }) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let (config, mut session) = open_session(celsius, dark)?;
                match city {
                    Some(city) => {
                        if !session.search(&city).await {
                            anyhow::bail!("City name must not be empty");
                        }
                    }
                    None => session.load_initial().await,
                }
                print!("{}", render(session.state(), &config.display.icon_base_url));
                Ok(())
            }
            Command::Locate { lat, lon } => {
                let (config, mut session) = open_session(celsius, dark)?;
                let geolocator: Option<Box<dyn Geolocator>> = match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        Some(Box::new(FixedLocation(Coordinates::new(lat, lon))))
                    }
                    _ => geolocator_from_config(&config),
                };
                session.use_location(geolocator.as_deref()).await;
                print!("{}", render(session.state(), &config.display.icon_base_url));
                Ok(())
            }
            Command::Interactive => {
                let (config, mut session) = open_session(celsius, dark)?;
                let geolocator = geolocator_from_config(&config);
                interactive(&mut session, geolocator.as_deref(), &config.display.icon_base_url)
                    .await
            }
        }
    }
}

/// Load config (file, then environment, then flags) and build a session on it.
fn open_session(
    celsius: bool,
    dark: bool,
) -> anyhow::Result<(Config, WeatherSession<RapidApiProvider>)> {
    let mut config = Config::load()?.with_env_overrides();
    config.display.celsius |= celsius;
    config.display.dark_mode |= dark;

    let session = WeatherSession::new(provider_from_config(&config), &config);
    Ok((config, session))
}

#[derive(Debug, Clone, Copy)]
enum MenuAction {
    Search,
    UseLocation,
    ToggleUnits,
    ToggleTheme,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 5] = [
        MenuAction::Search,
        MenuAction::UseLocation,
        MenuAction::ToggleUnits,
        MenuAction::ToggleTheme,
        MenuAction::Quit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::Search => "Search for a city",
            MenuAction::UseLocation => "Use my location",
            MenuAction::ToggleUnits => "Switch °F / °C",
            MenuAction::ToggleTheme => "Toggle dark mode",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

async fn interactive(
    session: &mut WeatherSession<RapidApiProvider>,
    geolocator: Option<&dyn Geolocator>,
    icon_base: &str,
) -> anyhow::Result<()> {
    session.load_initial().await;

    loop {
        println!();
        print!("{}", render(session.state(), icon_base));

        let action = match Select::new("What next?", MenuAction::ALL.to_vec()).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read menu choice"),
        };

        match action {
            MenuAction::Search => {
                let input = match Text::new("City name:").prompt() {
                    Ok(input) => input,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err).context("Failed to read city name"),
                };
                session.search(&input).await;
            }
            MenuAction::UseLocation => session.use_location(geolocator).await,
            MenuAction::ToggleUnits => session.toggle_units(),
            MenuAction::ToggleTheme => session.toggle_dark_mode(),
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("RapidAPI key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let host = Text::new("RapidAPI host:")
        .with_default(&config.api.host)
        .prompt()
        .context("Failed to read API host")?;

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.set_credentials(key.trim().to_string(), host.trim().to_string());
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
