//! Typed views of provider documents, applied only after validation.
//!
//! Every metric is an `f64` so both integer and floating JSON encodings
//! deserialize. Sections the provider sometimes omits (`rain`, `snow`,
//! `sys`, `wind`, `clouds`) fall back to defaults instead of failing the
//! whole document.

use serde::Deserialize;

/// Current-weather document, `/data/2.5/weather` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sys: SysSection,
    pub main: MainSection,
    #[serde(default)]
    pub weather: Vec<ConditionSection>,
    #[serde(default)]
    pub wind: WindSection,
    #[serde(default)]
    pub rain: Option<PrecipSection>,
    #[serde(default)]
    pub snow: Option<PrecipSection>,
    /// UTC offset of the location, in seconds.
    #[serde(default)]
    pub timezone: Option<i64>,
    /// Wall-clock label a port binding may have injected upstream.
    #[serde(default)]
    pub local_time: Option<String>,
}

/// Forecast document, `/data/2.5/forecast` shape: a flat ordered list of
/// 3-hour intervals.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDocument {
    #[serde(default)]
    pub list: Vec<IntervalRecord>,
}

/// One 3-hour forecast interval.
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalRecord {
    /// Timestamp as `"YYYY-MM-DD HH:MM:SS"`.
    pub dt_txt: String,
    pub main: MainSection,
    #[serde(default)]
    pub clouds: CloudsSection,
    #[serde(default)]
    pub wind: WindSection,
    /// Precipitation probability as a `[0, 1]` fraction.
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub rain: Option<PrecipSection>,
    #[serde(default)]
    pub weather: Vec<ConditionSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysSection {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainSection {
    pub temp: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionSection {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindSection {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudsSection {
    #[serde(default)]
    pub all: f64,
}

/// `rain`/`snow` accumulation buckets, keyed by window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrecipSection {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h", default)]
    pub three_hours: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_document_accepts_integral_metrics() {
        let doc: CurrentDocument = serde_json::from_value(json!({
            "name": "London",
            "sys": {"country": "UK"},
            "main": {"temp": 20, "humidity": 81},
            "weather": [{"description": "light rain", "icon": "10d"}],
            "wind": {"speed": 3},
        }))
        .expect("integral encodings must deserialize");

        assert!((doc.main.temp - 20.0).abs() < f64::EPSILON);
        assert!((doc.wind.speed - 3.0).abs() < f64::EPSILON);
        assert!(doc.rain.is_none());
        assert!(doc.timezone.is_none());
    }

    #[test]
    fn precip_section_window_keys() {
        let doc: CurrentDocument = serde_json::from_value(json!({
            "name": "Bergen",
            "main": {"temp": 9.4},
            "rain": {"1h": 0.8},
        }))
        .expect("rain bucket must deserialize");

        let rain = doc.rain.expect("rain section present");
        assert_eq!(rain.one_hour, Some(0.8));
        assert_eq!(rain.three_hours, None);
    }

    #[test]
    fn interval_record_defaults_missing_sections() {
        let record: IntervalRecord = serde_json::from_value(json!({
            "dt_txt": "2025-03-11 12:00:00",
            "main": {"temp": 14},
        }))
        .expect("sparse interval must deserialize");

        assert!((record.pop - 0.0).abs() < f64::EPSILON);
        assert!((record.clouds.all - 0.0).abs() < f64::EPSILON);
        assert!(record.weather.is_empty());
    }
}
