//! Text dashboard for pipeline results.

use skycast_core::model::celsius_to_fahrenheit;
use skycast_core::{Background, FetchError, ForecastDay, Settings, WeatherSnapshot};

pub fn dashboard(
    snapshot: &WeatherSnapshot,
    forecast: &[ForecastDay],
    alert_fired: bool,
    settings: &Settings,
) {
    println!("{}", banner(settings.background));
    println!();
    println!("{}, {}", snapshot.location_name, snapshot.country_code);
    if let Some(local_time) = &snapshot.local_time {
        println!("Local Time: {local_time}");
    }
    println!(
        "{} {}  {}",
        icon_glyph(&snapshot.icon, settings.use_3d_icons),
        format_temp(snapshot.temperature_c, settings.use_celsius),
        snapshot.condition,
    );
    println!("Humidity: {:.0}%", snapshot.humidity_pct);
    println!("Wind: {:.1} m/s", snapshot.wind_speed_mps);
    println!("{}", precip_line(snapshot.precipitation_mm, &snapshot.condition));

    if alert_fired {
        println!();
        println!(
            "!! Weather alert: it looks like {} in {}. Stay safe!",
            snapshot.condition.to_lowercase(),
            snapshot.location_name,
        );
    }

    if !forecast.is_empty() {
        println!();
        for day in forecast {
            println!(
                "{:<9} {} {}  {}  (min {} / max {}, feels like {})",
                day.day_label,
                icon_glyph(&day.icon, settings.use_3d_icons),
                format_temp(day.temperature_c, settings.use_celsius),
                day.condition,
                format_temp(day.temp_min_c, settings.use_celsius),
                format_temp(day.temp_max_c, settings.use_celsius),
                format_temp(day.feels_like_c, settings.use_celsius),
            );
            println!(
                "          pressure {:.0} hPa, clouds {:.0}%, wind dir {:.0}°, \
                 precip {:.0}% chance / {:.2} mm",
                day.pressure_hpa,
                day.cloudiness_pct,
                day.wind_direction_deg,
                day.precipitation_chance_pct,
                day.precipitation_mm,
            );
        }
    }
}

pub fn failure(error: &FetchError) {
    match error {
        FetchError::NotConnected => {
            eprintln!("No remote weather service bound.");
            eprintln!("Hint: set OPENWEATHER_API_KEY and try again.");
        }
        FetchError::LocationNotFound => eprintln!("Location not found!"),
        FetchError::ParseFailure(detail) => eprintln!("Error parsing server data: {detail}"),
        FetchError::TransportFailure(detail) => {
            eprintln!("Error fetching data from server: {detail}");
        }
    }
}

fn banner(background: Background) -> &'static str {
    match background {
        Background::Default => "~ skycast ~",
        Background::Forest => "~ skycast · forest ~",
        Background::City => "~ skycast · city ~",
    }
}

fn format_temp(temp_c: f64, use_celsius: bool) -> String {
    if use_celsius {
        format!("{temp_c:.1}°C")
    } else {
        format!("{:.1}°F", celsius_to_fahrenheit(temp_c))
    }
}

/// Glyphs for the provider's icon-code families ("10d" → rain, day). The
/// decorated set stands in for the app's 3D icon style.
fn icon_glyph(code: &str, use_3d: bool) -> &'static str {
    let family = code.get(..2).unwrap_or("");
    if use_3d {
        match family {
            "01" => "🌞",
            "02" => "⛅",
            "03" | "04" => "☁️",
            "09" => "🌧️",
            "10" => "🌦️",
            "11" => "⛈️",
            "13" => "❄️",
            "50" => "🌫️",
            _ => "🌡️",
        }
    } else {
        match family {
            "01" => "☀",
            "02" => "⛅",
            "03" | "04" => "☁",
            "09" | "10" => "☂",
            "11" => "⚡",
            "13" => "❄",
            "50" => "≡",
            _ => "·",
        }
    }
}

/// Zero measured precipitation still renders as "Trace" when the
/// description says rain, drizzle or snow.
fn precip_line(precip_mm: f64, condition: &str) -> String {
    if precip_mm > 0.0 {
        return format!("Precip: {precip_mm:.2} mm");
    }

    let lower = condition.to_lowercase();
    if lower.contains("rain") || lower.contains("drizzle") || lower.contains("snow") {
        "Precip: Trace".to_string()
    } else {
        "Precip: 0 mm".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_rule_applies_only_to_wet_descriptions() {
        assert_eq!(precip_line(0.0, "Light rain"), "Precip: Trace");
        assert_eq!(precip_line(0.0, "Drizzle"), "Precip: Trace");
        assert_eq!(precip_line(0.0, "Clear sky"), "Precip: 0 mm");
        assert_eq!(precip_line(1.2, "Light rain"), "Precip: 1.20 mm");
    }

    #[test]
    fn temperatures_render_in_the_preferred_unit() {
        assert_eq!(format_temp(20.0, true), "20.0°C");
        assert_eq!(format_temp(20.0, false), "68.0°F");
    }

    #[test]
    fn icon_families_map_to_glyphs() {
        assert_eq!(icon_glyph("10d", false), "☂");
        assert_eq!(icon_glyph("10n", false), "☂");
        assert_eq!(icon_glyph("01d", false), "☀");
        assert_eq!(icon_glyph("13d", true), "❄️");
        assert_eq!(icon_glyph("", false), "·");
    }
}
