use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use skycast_core::{
    Config, Coordinates, Dashboard, FavoritesStore, FileStorage, LocationQuery,
    MeasurementSystem, OpenWeatherClient, Phase,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeatherMap API key and default units.
    Configure,

    /// Show current conditions and forecast for a city or coordinates.
    Show {
        /// City name, e.g. "Paris". Omit when passing --lat/--lon.
        city: Option<String>,

        /// Latitude of the location to look up.
        #[arg(long, requires = "lon", conflicts_with = "city")]
        lat: Option<f64>,

        /// Longitude of the location to look up.
        #[arg(long, requires = "lat", conflicts_with = "city")]
        lon: Option<f64>,

        /// Measurement system override: "metric" or "imperial".
        #[arg(long, value_parser = parse_units)]
        units: Option<MeasurementSystem>,

        /// Show the next 24 hours instead of the 5-day view.
        #[arg(long)]
        hourly: bool,
    },

    /// Add a city to the favorites, or remove it if already present.
    Favorite {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// List the favorite cities with their last-known conditions.
    Favorites,
}

fn parse_units(value: &str) -> Result<MeasurementSystem, String> {
    MeasurementSystem::try_from(value).map_err(|err| err.to_string())
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, lat, lon, units, hourly } => {
                let system = units.unwrap_or(config.units);
                let mut dash = dashboard(&config, system)?;

                match (city, lat, lon) {
                    (Some(city), _, _) => dash.search(&city).await,
                    (None, Some(lat), Some(lon)) => {
                        let position = Coordinates { latitude: lat, longitude: lon };
                        dash.lookup(LocationQuery::Position(position)).await;
                    }
                    _ => bail!("Pass a city name or both --lat and --lon."),
                }

                match dash.phase() {
                    Phase::Loaded(snapshot) => {
                        render::current(&snapshot.current, system);
                        if hourly {
                            render::hourly(&snapshot.forecast, system);
                        } else {
                            render::daily(&snapshot.forecast, system);
                        }
                        Ok(())
                    }
                    Phase::Failed(err) => bail!("{err}"),
                    Phase::Idle | Phase::Loading => unreachable!("lookup was awaited"),
                }
            }
            Command::Favorite { city } => {
                let system = config.units;
                let mut dash = dashboard(&config, system)?;

                dash.search(&city).await;
                match dash.phase() {
                    Phase::Loaded(_) => {
                        dash.toggle_favorite();
                        render::favorites(dash.favorites(), system);
                        Ok(())
                    }
                    Phase::Failed(err) => bail!("{err}"),
                    Phase::Idle | Phase::Loading => unreachable!("lookup was awaited"),
                }
            }
            Command::Favorites => {
                let store = FavoritesStore::new(FileStorage::new()?);
                render::favorites(&store.load(), config.units);
                Ok(())
            }
        }
    }
}

fn dashboard(
    config: &Config,
    system: MeasurementSystem,
) -> Result<Dashboard<OpenWeatherClient, FileStorage>> {
    let api_key = config.require_api_key()?;
    let client = OpenWeatherClient::new(api_key.to_owned());
    let store = FavoritesStore::new(FileStorage::new()?);

    Ok(Dashboard::new(client, store, system))
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let units = inquire::Select::new("Default units:", vec!["metric", "imperial"]).prompt()?;

    config.set_api_key(api_key.trim().to_string());
    config.units = MeasurementSystem::try_from(units)?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
