//! Orchestrates one fetch: remote calls, validation, aggregation,
//! notification gating, and delivery back to the render context.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use chrono::Local;
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::document::{CurrentDocument, ForecastDocument};
use crate::forecast::aggregate_forecast;
use crate::localtime::estimate_local_time;
use crate::model::{
    FetchError, FetchOutcome, ForecastDay, WeatherQuery, WeatherSnapshot, capitalize,
};
use crate::notify::is_alert_worthy;
use crate::remote::RemoteWeatherPort;
use crate::validate::{DocumentKind, validate};

/// Drives the fetch-aggregate-deliver flow for one presentation consumer.
///
/// A pipeline may have no port bound at all (the remote service was never
/// reached); every fetch then short-circuits to `NotConnected` without a
/// call attempt. Concurrent fetches are allowed to race: each delivers
/// exactly one outcome and nothing is cancelled, so consumers that care
/// about staleness apply last-request-wins on their side.
pub struct FetchPipeline {
    port: Option<Arc<dyn RemoteWeatherPort>>,
    /// Snapshot of the notifications preference, taken when the pipeline
    /// is set up. The pipeline never writes preferences.
    notifications_enabled: bool,
    runtime: Handle,
}

impl FetchPipeline {
    pub fn new(
        port: Option<Arc<dyn RemoteWeatherPort>>,
        notifications_enabled: bool,
        runtime: Handle,
    ) -> Self {
        Self {
            port,
            notifications_enabled,
            runtime,
        }
    }

    /// Start a fetch and return immediately.
    ///
    /// Safe to call from the render context: all remote and parsing work
    /// runs on the pipeline's runtime, and the single outcome (success or
    /// a classified error) is marshalled back through `tx`. The render
    /// context only ever observes results via its channel; workers never
    /// touch presentation state directly.
    pub fn fetch(&self, query: WeatherQuery, tx: Sender<FetchOutcome>) {
        let port = self.port.clone();
        let notifications_enabled = self.notifications_enabled;

        self.runtime.spawn(async move {
            let outcome = run_fetch(port, query, notifications_enabled).await;
            // A consumer that went away is not an error worth surfacing.
            let _ = tx.send(outcome);
        });
    }
}

/// The awaitable core of a fetch invocation. Every path yields exactly one
/// classified outcome; nothing is retried and nothing is silently dropped.
pub async fn run_fetch(
    port: Option<Arc<dyn RemoteWeatherPort>>,
    query: WeatherQuery,
    notifications_enabled: bool,
) -> FetchOutcome {
    let Some(port) = port else {
        return FetchOutcome::Failed(FetchError::NotConnected);
    };

    match fetch_weather(port.as_ref(), &query, notifications_enabled).await {
        Ok(outcome) => outcome,
        Err(error) => FetchOutcome::Failed(error),
    }
}

async fn fetch_weather(
    port: &dyn RemoteWeatherPort,
    query: &WeatherQuery,
    notifications_enabled: bool,
) -> Result<FetchOutcome, FetchError> {
    debug!(%query, "starting fetch");

    let current_raw = match query {
        WeatherQuery::City(city) => port.current_by_city(city).await,
        WeatherQuery::Coordinates { lat, lon } => port.current_by_coordinates(*lat, *lon).await,
    }
    .map_err(|error| FetchError::TransportFailure(format!("{error:#}")))?;

    let current_json: Value = serde_json::from_str(&current_raw)
        .map_err(|error| FetchError::ParseFailure(error.to_string()))?;

    validate(&current_json, DocumentKind::Current)?;

    let document: CurrentDocument = serde_json::from_value(current_json)
        .map_err(|error| FetchError::ParseFailure(error.to_string()))?;
    let snapshot = build_snapshot(document);

    // Current weather succeeded; from here on nothing can fail the fetch.
    let forecast = fetch_forecast(port, query).await;

    let alert_fired = notifications_enabled && is_alert_worthy(&snapshot.condition);

    info!(
        location = %snapshot.location_name,
        forecast_days = forecast.len(),
        alert_fired,
        "fetch completed"
    );

    Ok(FetchOutcome::Succeeded {
        snapshot,
        forecast,
        alert_fired,
    })
}

/// Forecast-stage failures never abort a successful current-weather fetch:
/// transport errors, unparseable documents, and provider-flagged failures
/// all degrade to an empty forecast.
async fn fetch_forecast(port: &dyn RemoteWeatherPort, query: &WeatherQuery) -> Vec<ForecastDay> {
    let raw = match query {
        WeatherQuery::City(city) => port.forecast_by_city(city).await,
        WeatherQuery::Coordinates { lat, lon } => port.forecast_by_coordinates(*lat, *lon).await,
    };

    let raw = match raw {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, "forecast request failed, continuing without forecast");
            return Vec::new();
        }
    };

    let json: Value = match serde_json::from_str(&raw) {
        Ok(json) => json,
        Err(error) => {
            warn!(%error, "forecast document unparseable, continuing without forecast");
            return Vec::new();
        }
    };

    if !matches!(validate(&json, DocumentKind::Forecast), Ok(true)) {
        return Vec::new();
    }

    let document: ForecastDocument = match serde_json::from_value(json) {
        Ok(document) => document,
        Err(error) => {
            warn!(%error, "forecast document malformed, continuing without forecast");
            return Vec::new();
        }
    };

    aggregate_forecast(&document.list, Local::now().date_naive())
}

fn build_snapshot(document: CurrentDocument) -> WeatherSnapshot {
    let condition = document.weather.into_iter().next().unwrap_or_default();

    // rain takes precedence over snow; a present section with a missing
    // window bucket still reads as 0.0.
    let precipitation_mm = if let Some(rain) = document.rain {
        rain.one_hour.unwrap_or(0.0)
    } else if let Some(snow) = document.snow {
        snow.one_hour.unwrap_or(0.0)
    } else {
        0.0
    };

    // An upstream-injected label wins; otherwise estimate from the
    // document's UTC offset. Neither present means "unknown".
    let local_time = document
        .local_time
        .or_else(|| document.timezone.map(estimate_local_time));

    WeatherSnapshot {
        location_name: document.name,
        country_code: document.sys.country,
        local_time,
        temperature_c: document.main.temp,
        condition: capitalize(&condition.description),
        icon: condition.icon,
        humidity_pct: document.main.humidity,
        wind_speed_mps: document.wind.speed,
        precipitation_mm,
    }
}
