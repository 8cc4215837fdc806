use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use weathermap::geocoding::{ForwardGeocoder, NominatimClient};
use weathermap::handler::gather_report;
use weathermap::models::Coordinate;
use weathermap::weather::OpenWeatherMapClient;
use weathermap::{AppContext, WeatherMapConfig, WeatherMapError, logging, web};

/// Interactive weather map: click or search a place to see current weather
/// and a 5-day forecast
#[derive(Debug, Parser)]
#[command(name = "weathermap", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Port to listen on, overrides [server] port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a weather report for a coordinate or a place name
    Report {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Place name to geocode instead of a coordinate
        #[arg(long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
        place: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match WeatherMapConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging, cli.verbose);

    let result = match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(config, port).await,
        Command::Report { lat, lon, place } => report(&config, lat, lon, place).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<WeatherMapError>() {
                Some(err) if matches!(err, WeatherMapError::Config { .. }) => eprintln!("Error: {err}"),
                Some(err) => eprintln!("Error: {}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            tracing::debug!("Command failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: WeatherMapConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.server.port);
    let ctx = AppContext::from_config(config).context("Failed to set up providers")?;
    web::run(Arc::new(ctx), port).await
}

async fn report(
    config: &WeatherMapConfig,
    lat: Option<f64>,
    lon: Option<f64>,
    place: Option<String>,
) -> Result<()> {
    let owm = OpenWeatherMapClient::from_config(config)?;
    let nominatim = NominatimClient::from_config(config)?;

    let coord = match (lat, lon, place) {
        (Some(lat), Some(lon), _) => Coordinate::new(lat, lon)?,
        (_, _, Some(place)) => {
            if place.trim().is_empty() {
                return Err(WeatherMapError::validation("Location cannot be empty").into());
            }
            owm.geocode_place(place.trim())
                .await?
                .ok_or_else(|| WeatherMapError::general(format!("Location not found: {place}")))?
        }
        _ => return Err(WeatherMapError::validation("Give --lat and --lon, or --place").into()),
    };

    let report = gather_report(&owm, &nominatim, coord).await.ok_or_else(|| {
        WeatherMapError::general("Weather data is unavailable for this location right now.")
    })?;

    print!("{}", report.to_text());
    Ok(())
}
