//! OpenWeatherMap binding of the remote weather port.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::RemoteWeatherPort;
use crate::localtime::estimate_local_time;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// HTTP-backed [`RemoteWeatherPort`] against the OpenWeatherMap 2.5 API.
///
/// Current-weather documents that carry a `timezone` offset get a
/// `local_time` field injected before they reach callers, so consumers can
/// show the location's wall clock without re-deriving it. Provider-flagged
/// failures (unknown city, bad key) come back as JSON bodies with a `cod`
/// field; those are returned as-is for the caller's validator to classify,
/// and only network failures or unreadable payloads are errors here.
#[derive(Debug, Clone)]
pub struct OpenWeatherPort {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherPort {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the binding at a different server. Used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn current_document(&self, params: &[(&str, String)]) -> Result<String> {
        let mut json = self.fetch_document("weather", params).await?;
        inject_local_time(&mut json);
        Ok(json.to_string())
    }

    async fn forecast_document(&self, params: &[(&str, String)]) -> Result<String> {
        let json = self.fetch_document("forecast", params).await?;
        Ok(json.to_string())
    }

    async fn fetch_document(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!(%url, "requesting provider document");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        serde_json::from_str(&body).with_context(|| {
            format!(
                "OpenWeather {} returned status {} with an unreadable body: {}",
                endpoint,
                status,
                truncate_body(&body),
            )
        })
    }
}

#[async_trait]
impl RemoteWeatherPort for OpenWeatherPort {
    async fn current_by_city(&self, city: &str) -> Result<String> {
        self.current_document(&[("q", city.to_string())]).await
    }

    async fn forecast_by_city(&self, city: &str) -> Result<String> {
        self.forecast_document(&[("q", city.to_string())]).await
    }

    async fn current_by_coordinates(&self, lat: f64, lon: f64) -> Result<String> {
        self.current_document(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .await
    }

    async fn forecast_by_coordinates(&self, lat: f64, lon: f64) -> Result<String> {
        self.forecast_document(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .await
    }

    async fn city_description(&self, _city: &str) -> Result<String> {
        // No description endpoint upstream; serve canned copy.
        Ok("A beautiful city known for its unique culture and history.".to_string())
    }

    async fn city_facts(&self, city: &str) -> Result<String> {
        Ok(format!(
            "Did you know? {city} has a rich heritage dating back centuries."
        ))
    }
}

/// Stamp the location's wall-clock time onto a current-weather document
/// that carries a UTC offset. Documents without one are left untouched.
fn inject_local_time(document: &mut Value) {
    let Some(offset) = document.get("timezone").and_then(Value::as_i64) else {
        return;
    };
    if let Some(fields) = document.as_object_mut() {
        fields.insert(
            "local_time".to_string(),
            Value::String(estimate_local_time(offset)),
        );
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
