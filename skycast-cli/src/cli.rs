use std::sync::Arc;
use std::sync::mpsc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};
use tokio::runtime::Runtime;

use skycast_core::{
    Background, FetchOutcome, FetchPipeline, OpenWeatherPort, RemoteWeatherPort, Settings,
    WeatherQuery,
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
    /// Show current weather and forecast for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,
    },

    /// Show current weather and forecast for coordinates.
    Locate {
        /// Latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Print a short description and facts for a city.
    Facts {
        /// City name.
        city: String,
    },

    /// Interactively edit persisted preferences.
    Configure,

    /// Toggle between Celsius and Fahrenheit for rendered temperatures.
    Units,

    /// Reset all preferences to their defaults.
    Reset,
}

impl Cli {
    pub fn run(self, runtime: &Runtime) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city } => {
                let settings = Settings::load()?;
                let city = match city {
                    Some(city) if !city.trim().is_empty() => city,
                    Some(_) => anyhow::bail!("Enter a city name"),
                    None => settings.default_city.clone(),
                };
                fetch_and_render(runtime, &settings, WeatherQuery::City(city))
            }
            Command::Locate { lat, lon } => {
                let settings = Settings::load()?;
                fetch_and_render(runtime, &settings, WeatherQuery::Coordinates { lat, lon })
            }
            Command::Facts { city } => show_facts(runtime, &city),
            Command::Configure => configure(),
            Command::Units => toggle_units(),
            Command::Reset => reset(),
        }
    }
}

/// An unbound port is a legal state: the pipeline then reports
/// `NotConnected` instead of attempting a call.
fn bind_port() -> Option<Arc<dyn RemoteWeatherPort>> {
    let api_key = std::env::var("OPENWEATHER_API_KEY").ok()?;
    Some(Arc::new(OpenWeatherPort::new(api_key)))
}

fn fetch_and_render(
    runtime: &Runtime,
    settings: &Settings,
    query: WeatherQuery,
) -> anyhow::Result<()> {
    let pipeline = FetchPipeline::new(
        bind_port(),
        settings.notifications_enabled,
        runtime.handle().clone(),
    );

    let (tx, rx) = mpsc::channel();
    pipeline.fetch(query, tx);

    // Main thread is the render context: block here until the worker
    // delivers the single outcome for this fetch.
    let outcome = rx
        .recv()
        .context("fetch worker dropped without delivering a result")?;

    match outcome {
        FetchOutcome::Succeeded {
            snapshot,
            forecast,
            alert_fired,
        } => render::dashboard(&snapshot, &forecast, alert_fired, settings),
        FetchOutcome::Failed(error) => render::failure(&error),
    }

    Ok(())
}

fn show_facts(runtime: &Runtime, city: &str) -> anyhow::Result<()> {
    let Some(port) = bind_port() else {
        anyhow::bail!("No remote weather service bound. Hint: set OPENWEATHER_API_KEY.");
    };

    let (description, facts) = runtime.block_on(async {
        let description = port.city_description(city).await?;
        let facts = port.city_facts(city).await?;
        anyhow::Ok((description, facts))
    })?;

    println!("{city}");
    println!("  {description}");
    println!("  {facts}");
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let current = Settings::load()?;

    let default_city = Text::new("Default city:")
        .with_initial_value(&current.default_city)
        .prompt()?;

    let use_celsius = Confirm::new("Show temperatures in Celsius?")
        .with_default(current.use_celsius)
        .prompt()?;

    let use_3d_icons = Confirm::new("Use the decorated (3D) icon set?")
        .with_default(current.use_3d_icons)
        .prompt()?;

    let background = Select::new("Background theme:", Background::all().to_vec()).prompt()?;

    let notifications_enabled = Confirm::new("Enable weather alerts?")
        .with_default(current.notifications_enabled)
        .prompt()?;

    let settings = Settings {
        default_city,
        use_celsius,
        use_3d_icons,
        background,
        notifications_enabled,
    };
    settings.save()?;

    println!("Saved settings to {}", Settings::config_file_path()?.display());
    Ok(())
}

fn toggle_units() -> anyhow::Result<()> {
    let mut settings = Settings::load()?;
    settings.use_celsius = !settings.use_celsius;
    settings.save()?;

    let unit = if settings.use_celsius { "Celsius" } else { "Fahrenheit" };
    println!("Temperatures will now render in {unit}.");
    Ok(())
}

fn reset() -> anyhow::Result<()> {
    Settings::clear()?;
    println!("Settings restored to defaults.");
    Ok(())
}
