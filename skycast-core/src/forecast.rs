//! Bucketing of the flat 3-hourly forecast feed into display views.

use crate::model::ForecastSample;

/// The feed delivers one sample every 3 hours.
pub const SAMPLES_PER_DAY: usize = 8;
/// The free forecast endpoint covers 5 days.
pub const DAYS_WANTED: usize = 5;
/// Samples shown in the hourly view, roughly the next 24 hours.
pub const HOURLY_COUNT: usize = 8;

/// One sample per day by stride: every [`SAMPLES_PER_DAY`]-th sample starting
/// at index 0, truncated to [`DAYS_WANTED`] entries.
///
/// This is deliberately the same fixed time-of-day pick each day, not a
/// min/max/average aggregate over the day's samples.
pub fn daily_view(samples: &[ForecastSample]) -> Vec<ForecastSample> {
    samples
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .take(DAYS_WANTED)
        .cloned()
        .collect()
}

/// The first [`HOURLY_COUNT`] samples in feed order.
pub fn hourly_view(samples: &[ForecastSample]) -> Vec<ForecastSample> {
    samples.iter().take(HOURLY_COUNT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherKind;
    use chrono::{Duration, TimeZone, Utc};

    fn feed(len: usize) -> Vec<ForecastSample> {
        let start = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
        (0..len)
            .map(|i| ForecastSample {
                at: start + Duration::hours(3 * i as i64),
                temp: i as f64,
                kind: WeatherKind::Clouds,
                description: "scattered clouds".to_string(),
            })
            .collect()
    }

    #[test]
    fn daily_view_strides_over_a_full_feed() {
        let samples = feed(40);
        let daily = daily_view(&samples);

        assert_eq!(daily.len(), 5);
        let picked: Vec<f64> = daily.iter().map(|s| s.temp).collect();
        assert_eq!(picked, vec![0.0, 8.0, 16.0, 24.0, 32.0]);
    }

    #[test]
    fn daily_view_truncates_to_five_days() {
        let samples = feed(100);
        assert_eq!(daily_view(&samples).len(), 5);
    }

    #[test]
    fn views_of_empty_feed_are_empty() {
        assert!(daily_view(&[]).is_empty());
        assert!(hourly_view(&[]).is_empty());
    }

    #[test]
    fn hourly_view_keeps_short_feed_whole_and_ordered() {
        let samples = feed(3);
        let hourly = hourly_view(&samples);

        assert_eq!(hourly.len(), 3);
        let picked: Vec<f64> = hourly.iter().map(|s| s.temp).collect();
        assert_eq!(picked, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn hourly_view_caps_at_eight() {
        let samples = feed(40);
        assert_eq!(hourly_view(&samples).len(), 8);
    }
}
