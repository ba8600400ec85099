//! Buckets the provider's flat 3-hour forecast stream into daily summaries.

use chrono::NaiveDate;

use crate::document::IntervalRecord;
use crate::model::{ForecastDay, capitalize};

/// Upper bound on aggregated days.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Collapse an ordered stream of 3-hour interval records into at most
/// [`MAX_FORECAST_DAYS`] daily summaries, one per distinct calendar date,
/// in encounter order.
///
/// The first record seen for a date represents the whole day; later
/// records for the same date are ignored. Days equal to `today` are
/// skipped, so the current date never appears in forecast output even when
/// it leads the input. A list with no records past `today` yields an empty
/// result, not an error.
///
/// `today` is the *host's* calendar date. Near midnight this can disagree
/// with the queried location's local date; the literal host-date
/// comparison is a known limitation kept on purpose.
pub fn aggregate_forecast(records: &[IntervalRecord], today: NaiveDate) -> Vec<ForecastDay> {
    let mut days = Vec::new();
    let mut previous_date = "";

    for record in records {
        let date_part = record.dt_txt.split(' ').next().unwrap_or("");
        if date_part == previous_date {
            continue;
        }
        previous_date = date_part;

        let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
            continue;
        };
        if date == today {
            continue;
        }

        days.push(build_day(record, date));
        if days.len() >= MAX_FORECAST_DAYS {
            break;
        }
    }

    days
}

fn build_day(record: &IntervalRecord, date: NaiveDate) -> ForecastDay {
    let condition = record.weather.first().cloned().unwrap_or_default();

    // Accumulated rain lives under rain."3h"; a missing bucket is 0.0, not
    // a failed aggregation.
    let precipitation_mm = record
        .rain
        .as_ref()
        .and_then(|rain| rain.three_hours)
        .unwrap_or(0.0);

    ForecastDay {
        // Full English weekday name, e.g. "Wednesday".
        day_label: date.format("%A").to_string(),
        icon: condition.icon,
        temperature_c: record.main.temp,
        condition: capitalize(&condition.description),
        temp_min_c: record.main.temp_min,
        temp_max_c: record.main.temp_max,
        feels_like_c: record.main.feels_like,
        pressure_hpa: record.main.pressure,
        cloudiness_pct: record.clouds.all,
        wind_direction_deg: record.wind.deg,
        precipitation_chance_pct: record.pop * 100.0,
        precipitation_mm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(dt_txt: &str, temp: f64) -> IntervalRecord {
        serde_json::from_value(json!({
            "dt_txt": dt_txt,
            "main": {"temp": temp, "temp_min": temp - 2.0, "temp_max": temp + 2.0,
                     "feels_like": temp - 1.0, "pressure": 1012},
            "clouds": {"all": 40},
            "wind": {"speed": 3.4, "deg": 180},
            "pop": 0.4,
            "weather": [{"description": "scattered clouds", "icon": "03d"}],
        }))
        .expect("test record must deserialize")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
    }

    #[test]
    fn first_record_per_date_represents_the_day() {
        let records = vec![
            record("2025-03-11 00:00:00", 8.0),
            record("2025-03-11 03:00:00", 5.0),
            record("2025-03-11 06:00:00", 4.0),
            record("2025-03-12 00:00:00", 12.0),
        ];

        let days = aggregate_forecast(&records, today());

        assert_eq!(days.len(), 2);
        assert!((days[0].temperature_c - 8.0).abs() < f64::EPSILON);
        assert_eq!(days[0].day_label, "Tuesday");
        assert_eq!(days[1].day_label, "Wednesday");
    }

    #[test]
    fn todays_records_never_appear_even_when_leading() {
        let records = vec![
            record("2025-03-10 18:00:00", 10.0),
            record("2025-03-10 21:00:00", 9.0),
            record("2025-03-11 00:00:00", 8.0),
            record("2025-03-11 03:00:00", 7.0),
            record("2025-03-11 06:00:00", 6.0),
            record("2025-03-12 00:00:00", 12.0),
            record("2025-03-12 03:00:00", 11.0),
            record("2025-03-12 06:00:00", 13.0),
            record("2025-03-13 00:00:00", 14.0),
            record("2025-03-13 03:00:00", 15.0),
            record("2025-03-13 06:00:00", 16.0),
        ];

        let days = aggregate_forecast(&records, today());

        assert_eq!(days.len(), 3);
        assert_eq!(
            days.iter().map(|d| d.day_label.as_str()).collect::<Vec<_>>(),
            ["Tuesday", "Wednesday", "Thursday"]
        );
    }

    #[test]
    fn caps_at_five_days() {
        let records: Vec<_> = (11..=18)
            .map(|day| record(&format!("2025-03-{day} 00:00:00"), 10.0))
            .collect();

        let days = aggregate_forecast(&records, today());

        assert_eq!(days.len(), MAX_FORECAST_DAYS);
    }

    #[test]
    fn fewer_than_five_future_dates_never_pads() {
        let records = vec![record("2025-03-11 00:00:00", 10.0)];
        assert_eq!(aggregate_forecast(&records, today()).len(), 1);
    }

    #[test]
    fn no_records_after_today_yields_empty() {
        let records = vec![
            record("2025-03-10 12:00:00", 10.0),
            record("2025-03-10 15:00:00", 11.0),
        ];
        assert!(aggregate_forecast(&records, today()).is_empty());
        assert!(aggregate_forecast(&[], today()).is_empty());
    }

    #[test]
    fn missing_rain_bucket_defaults_to_zero() {
        let days = aggregate_forecast(&[record("2025-03-11 00:00:00", 10.0)], today());
        assert!((days[0].precipitation_mm - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rain_bucket_and_pop_scaling() {
        let mut rec = record("2025-03-11 00:00:00", 10.0);
        rec.rain = serde_json::from_value(json!({"3h": 1.25})).expect("rain bucket");
        rec.pop = 0.75;

        let days = aggregate_forecast(&[rec], today());

        assert!((days[0].precipitation_mm - 1.25).abs() < f64::EPSILON);
        assert!((days[0].precipitation_chance_pct - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn condition_is_capitalized_for_display() {
        let days = aggregate_forecast(&[record("2025-03-11 00:00:00", 10.0)], today());
        assert_eq!(days[0].condition, "Scattered clouds");
        assert_eq!(days[0].icon, "03d");
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            record("2025-03-11 00:00:00", 8.0),
            record("2025-03-12 00:00:00", 12.0),
            record("2025-03-13 00:00:00", 14.0),
        ];

        let first = aggregate_forecast(&records, today());
        let second = aggregate_forecast(&records, today());

        assert_eq!(first, second);
    }
}
