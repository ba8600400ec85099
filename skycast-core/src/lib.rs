//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - The remote weather port contract and its OpenWeatherMap binding
//! - Validation and classification of raw provider documents
//! - Aggregation of the 3-hour forecast stream into daily summaries
//! - The fetch pipeline that delivers results to a presentation consumer
//! - Persisted user settings
//!
//! It is used by `skycast-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod document;
pub mod forecast;
pub mod localtime;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod remote;
pub mod validate;

pub use config::{Background, Settings};
pub use model::{FetchError, FetchOutcome, ForecastDay, WeatherQuery, WeatherSnapshot};
pub use pipeline::FetchPipeline;
pub use remote::{OpenWeatherPort, RemoteWeatherPort};
