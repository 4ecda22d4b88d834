use chrono::Local;
use clap::{Parser, Subcommand};
use weather_core::{
    Config, HomeLocator, LocationQuery, Locator, ProxyClient, SearchKind, Session, UiError,
    UnitSystem,
};

use crate::{configure, interactive, locate::ConsentLocator, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Base URL of the weather proxy; overrides the config file.
    #[arg(long, global = true, env = "WEATHER_PROXY_URL")]
    pub proxy_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the proxy URL, default units, home location and API key.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,

        /// "metric" or "imperial"; defaults to the configured units.
        #[arg(long)]
        units: Option<UnitSystem>,
    },

    /// Show weather for a latitude/longitude pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        #[arg(allow_negative_numbers = true)]
        lon: f64,

        #[arg(long)]
        units: Option<UnitSystem>,
    },

    /// Show weather for your saved home location.
    Here {
        #[arg(long)]
        units: Option<UnitSystem>,
    },

    /// Search repeatedly, switching units as you go.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = match self.command {
            Command::Configure => configure::load_or_default(&Config::config_file_path()?),
            _ => Config::load()?,
        };
        if let Some(url) = self.proxy_url {
            config.client.proxy_url = Some(url);
        }

        let default_units = config.client.units;
        let client = ProxyClient::new(config.proxy_url())?;
        log::debug!("using weather proxy at {}", client.base_url());
        let locator = ConsentLocator::new(HomeLocator::new(config.client.home));

        match self.command {
            Command::Configure => configure::run(config)?,
            Command::Show { city, units } => {
                let session = Session::new(units.unwrap_or(default_units));
                let query = Session::search_city(&city)?;
                show(&client, &session, &query).await?;
            }
            Command::Coords { lat, lon, units } => {
                let session = Session::new(units.unwrap_or(default_units));
                let query = LocationQuery::coords(lat, lon)
                    .map_err(|_| UiError::InvalidInput(SearchKind::Coords))?;
                show(&client, &session, &query).await?;
            }
            Command::Here { units } => {
                let session = Session::new(units.unwrap_or(default_units));
                let coords = locator.locate().await.map_err(UiError::from)?;
                show(&client, &session, &LocationQuery::Coords(coords)).await?;
            }
            Command::Interactive => {
                interactive::run(&client, &locator, Session::new(default_units)).await?;
            }
        }

        Ok(())
    }
}

async fn show(
    client: &ProxyClient,
    session: &Session,
    query: &LocationQuery,
) -> Result<(), UiError> {
    let (_, report) = session.fetch(client, query, &Local).await?;
    print!("{}", render::render_report(&report, &Local));
    Ok(())
}
