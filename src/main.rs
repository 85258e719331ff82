use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use weather_dashboard::config::CREDENTIAL_ENV;
use weather_dashboard::{
    AppState, DashboardConfig, OpenWeatherFetcher, WeatherResponse, load_cities,
    parse_coordinate_params, telemetry, web,
};

/// Current-weather dashboard backed by OpenWeather
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the predefined cities
    Cities {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Fetch current weather once and print the payload
    Weather {
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        #[arg(long, allow_hyphen_values = true)]
        lon: String,
        /// Print the upstream payload instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DashboardConfig::load_from_path(cli.config.clone())?;
    telemetry::init(&config.logging, cli.verbose)?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(config, port).await,
        Command::Cities { file } => {
            let path = file.unwrap_or_else(|| config.server.cities_file.clone());
            for city in load_cities(&path)? {
                println!("{city}");
            }
            Ok(())
        }
        Command::Weather { lat, lon, json } => {
            let (lat, lon) = parse_coordinate_params(Some(lat.as_str()), Some(lon.as_str()))?;
            let fetcher = OpenWeatherFetcher::new(&config.weather, &config.cache)?;
            let weather = fetcher.fetch(lat, lon).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&weather)?);
            } else {
                print_summary(&weather);
            }
            Ok(())
        }
    }
}

fn print_summary(weather: &WeatherResponse) {
    let name = if weather.name().is_empty() {
        "Unknown location"
    } else {
        weather.name()
    };
    println!("{name}: {}", weather.format_temperature());
    println!(
        "  feels like {:.1}°C, humidity {:.0}%",
        weather.main().feels_like,
        weather.main().humidity
    );
    if let Some(condition) = weather.condition() {
        println!("  {} ({})", condition.description, condition.icon_url());
    }
}

async fn serve(config: DashboardConfig, port: Option<u16>) -> Result<()> {
    if !config.has_api_key() {
        warn!("{CREDENTIAL_ENV} is not set; every weather request will fail until it is configured");
    }

    let fetcher = OpenWeatherFetcher::new(&config.weather, &config.cache)
        .context("Failed to create weather fetcher")?;
    let state = AppState::new(Arc::new(fetcher), config.server.cities_file.clone());
    let app = web::app(state, config.server.static_dir.as_deref());

    info!(
        cities_file = %config.server.cities_file.display(),
        ttl_seconds = config.cache.ttl_seconds,
        "Starting weather dashboard"
    );
    web::run(app, &config.server.host, port.unwrap_or(config.server.port)).await
}
