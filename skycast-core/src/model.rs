use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single lookup target. Exactly one shape is active per request; each
/// maps onto its own pair of remote operations.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherQuery::City(city) => f.write_str(city),
            WeatherQuery::Coordinates { lat, lon } => write!(f, "{lat}, {lon}"),
        }
    }
}

/// Normalized current conditions, built once per successful fetch and only
/// from documents that passed validation.
///
/// Temperatures are stored in Celsius; unit conversion is a render-time
/// concern and never touches this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country_code: String,
    /// Wall-clock time at the location, if the provider document allowed
    /// estimating one. `None` renders as "unknown", not as an error.
    pub local_time: Option<String>,
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    pub precipitation_mm: f64,
}

/// One day of the aggregated forecast, always strictly after the day the
/// fetch ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day_label: String,
    pub icon: String,
    pub temperature_c: f64,
    pub condition: String,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub feels_like_c: f64,
    pub pressure_hpa: f64,
    pub cloudiness_pct: f64,
    pub wind_direction_deg: f64,
    pub precipitation_chance_pct: f64,
    pub precipitation_mm: f64,
}

/// Classified failure of a single fetch invocation. Terminal: the pipeline
/// never retries on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("no remote weather service bound")]
    NotConnected,
    #[error("location not found")]
    LocationNotFound,
    #[error("failed to parse provider response: {0}")]
    ParseFailure(String),
    #[error("transport failure: {0}")]
    TransportFailure(String),
}

/// What a fetch invocation delivers to the presentation consumer. Every
/// invocation produces exactly one of these.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Succeeded {
        snapshot: WeatherSnapshot,
        /// Possibly empty; forecast-stage failures degrade to this rather
        /// than failing the whole fetch.
        forecast: Vec<ForecastDay>,
        /// The advisory alert decision, already gated on the notifications
        /// preference.
        alert_fired: bool,
    },
    Failed(FetchError),
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Upper-case the first letter of a condition description for display.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion_round_trip_stays_close() {
        for celsius in [-40.0, -5.5, 0.0, 18.3, 41.0] {
            let back = fahrenheit_to_celsius(celsius_to_fahrenheit(celsius));
            assert!((back - celsius).abs() < 0.1, "round trip drifted for {celsius}");
        }
    }

    #[test]
    fn celsius_to_fahrenheit_known_points() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < f64::EPSILON);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < f64::EPSILON);
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("Overcast"), "Overcast");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn query_display() {
        assert_eq!(WeatherQuery::City("London".into()).to_string(), "London");
        assert_eq!(
            WeatherQuery::Coordinates { lat: 51.5, lon: -0.13 }.to_string(),
            "51.5, -0.13"
        );
    }
}
