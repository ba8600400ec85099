//! Best-effort wall-clock time at the queried location.

use chrono::{Duration, Local, NaiveDateTime};

/// Estimate the local time at a location whose UTC offset is
/// `timezone_offset_secs`, formatted as zero-padded `HH:MM`.
///
/// The estimate shifts the host's clock by the difference between the
/// location's offset and the host's own UTC offset. Known limitation: this
/// ignores DST transitions around the query instant, which can skew the
/// label by the DST delta. Acceptable for a display label.
pub fn estimate_local_time(timezone_offset_secs: i64) -> String {
    let now = Local::now();
    let host_offset_secs = i64::from(now.offset().local_minus_utc());
    shift_to_location(now.naive_local(), timezone_offset_secs, host_offset_secs)
}

/// Offset arithmetic, split out so tests can pin "now" and the host offset.
fn shift_to_location(
    now: NaiveDateTime,
    timezone_offset_secs: i64,
    host_offset_secs: i64,
) -> String {
    let shifted = now + Duration::seconds(timezone_offset_secs - host_offset_secs);
    shifted.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .expect("valid date")
            .and_hms_opt(hour, minute, 0)
            .expect("valid time")
    }

    #[test]
    fn shifts_by_offset_difference() {
        // Host at UTC, location at UTC+1.
        assert_eq!(shift_to_location(at(12, 0), 3600, 0), "13:00");
        // Host already at UTC+1, location at UTC+1: no shift.
        assert_eq!(shift_to_location(at(12, 0), 3600, 3600), "12:00");
    }

    #[test]
    fn wraps_across_midnight() {
        assert_eq!(shift_to_location(at(23, 30), 3600, 0), "00:30");
        assert_eq!(shift_to_location(at(0, 15), -3600, 0), "23:15");
    }

    #[test]
    fn output_is_zero_padded() {
        assert_eq!(shift_to_location(at(9, 5), 0, 0), "09:05");
    }

    #[test]
    fn handles_half_hour_offsets() {
        // UTC+5:30 vs a UTC host.
        assert_eq!(shift_to_location(at(12, 0), 19800, 0), "17:30");
    }
}
