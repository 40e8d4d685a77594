//! Presentation formatting for fetched values.
//!
//! No conversion math happens here: raw values already arrive in the
//! measurement system that was requested at fetch time, so these helpers
//! only round and attach the right unit labels.

use chrono::{DateTime, Utc};

use crate::model::MeasurementSystem;

/// Round to the nearest integer and append the degree symbol for `system`.
pub fn format_temperature(value: f64, system: MeasurementSystem) -> String {
    format!("{}{}", value.round() as i64, degree_symbol(system))
}

pub fn degree_symbol(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "°C",
        MeasurementSystem::Imperial => "°F",
    }
}

pub fn wind_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "m/s",
        MeasurementSystem::Imperial => "mph",
    }
}

/// Format a distance reported in meters as kilometers with one decimal.
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

/// Clock time of a timestamp, e.g. "06:42".
pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

/// Short date of a timestamp, e.g. "Sat, Aug 30".
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%a, %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn temperature_rounds_to_nearest_integer() {
        assert_eq!(format_temperature(21.6, MeasurementSystem::Metric), "22°C");
        assert_eq!(format_temperature(21.4, MeasurementSystem::Metric), "21°C");
        assert_eq!(format_temperature(-0.2, MeasurementSystem::Metric), "0°C");
        assert_eq!(format_temperature(71.5, MeasurementSystem::Imperial), "72°F");
    }

    #[test]
    fn wind_labels_per_system() {
        assert_eq!(wind_unit_label(MeasurementSystem::Metric), "m/s");
        assert_eq!(wind_unit_label(MeasurementSystem::Imperial), "mph");
    }

    #[test]
    fn distance_is_km_with_one_decimal() {
        assert_eq!(format_distance_km(10000.0), "10.0 km");
        assert_eq!(format_distance_km(8450.0), "8.5 km");
        assert_eq!(format_distance_km(0.0), "0.0 km");
    }

    #[test]
    fn timestamps_format_for_display() {
        let at = Utc.with_ymd_and_hms(2024, 8, 3, 6, 42, 0).unwrap();
        assert_eq!(format_time(at), "06:42");
        assert_eq!(format_date(at), "Sat, Aug 3");
    }
}
