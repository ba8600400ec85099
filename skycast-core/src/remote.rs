use std::fmt::Debug;

use async_trait::async_trait;

pub mod openweather;

pub use openweather::OpenWeatherPort;

/// Capability contract of a remote weather service: six operations, each
/// returning a raw JSON document string.
///
/// Implementations are free to block their task for the whole remote round
/// trip; callers that own presentation state must therefore run these off
/// the render context. Failures are transport-level and wrap the
/// underlying cause; classifying them is the caller's job.
#[async_trait]
pub trait RemoteWeatherPort: Send + Sync + Debug {
    async fn current_by_city(&self, city: &str) -> anyhow::Result<String>;
    async fn forecast_by_city(&self, city: &str) -> anyhow::Result<String>;
    async fn current_by_coordinates(&self, lat: f64, lon: f64) -> anyhow::Result<String>;
    async fn forecast_by_coordinates(&self, lat: f64, lon: f64) -> anyhow::Result<String>;
    async fn city_description(&self, city: &str) -> anyhow::Result<String>;
    async fn city_facts(&self, city: &str) -> anyhow::Result<String>;
}
