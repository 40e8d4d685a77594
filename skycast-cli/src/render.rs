//! Human-friendly terminal output for the dashboard views.

use skycast_core::model::{CurrentConditions, FavoriteCity, ForecastSample, MeasurementSystem};
use skycast_core::{forecast, units};

/// Print the full current-conditions card.
pub fn current(current: &CurrentConditions, system: MeasurementSystem) {
    println!(
        "{}, {} — {} • {}",
        current.city,
        current.country,
        units::format_date(current.observed_at),
        units::format_time(current.observed_at),
    );
    println!(
        "  {}  {}  {}",
        current.kind.glyph(),
        units::format_temperature(current.temp, system),
        current.description,
    );
    println!(
        "  Feels like {:<7} Min/Max {} / {}",
        units::format_temperature(current.feels_like, system),
        units::format_temperature(current.temp_min, system),
        units::format_temperature(current.temp_max, system),
    );
    println!(
        "  Humidity {:<4}     Pressure {} hPa",
        format!("{}%", current.humidity_pct),
        current.pressure_hpa,
    );
    println!(
        "  Wind {:.1} {:<6}   Visibility {}",
        current.wind_speed,
        units::wind_unit_label(system),
        units::format_distance_km(current.visibility_m),
    );
    println!(
        "  Sunrise {}    Sunset {}",
        units::format_time(current.sunrise),
        units::format_time(current.sunset),
    );
}

/// Print the 5-day view: one stride-picked sample per day.
pub fn daily(samples: &[ForecastSample], system: MeasurementSystem) {
    let picks = forecast::daily_view(samples);
    if picks.is_empty() {
        return;
    }

    println!("\n5-day forecast:");
    for sample in &picks {
        println!(
            "  {:<12} {}  {:<5} {}",
            units::format_date(sample.at),
            sample.kind.glyph(),
            units::format_temperature(sample.temp, system),
            sample.description,
        );
    }
}

/// Print the hourly view: the next eight 3-hour slots.
pub fn hourly(samples: &[ForecastSample], system: MeasurementSystem) {
    let picks = forecast::hourly_view(samples);
    if picks.is_empty() {
        return;
    }

    println!("\nNext 24 hours:");
    for sample in &picks {
        println!(
            "  {}  {}  {:<5} {}",
            units::format_time(sample.at),
            sample.kind.glyph(),
            units::format_temperature(sample.temp, system),
            sample.description,
        );
    }
}

/// Print the favorites list with each city's last-known conditions.
pub fn favorites(favorites: &[FavoriteCity], system: MeasurementSystem) {
    if favorites.is_empty() {
        println!("No favorite cities yet. Add one with `skycast favorite <city>`.");
        return;
    }

    println!("Favorite cities:");
    for (i, favorite) in favorites.iter().enumerate() {
        println!(
            "  {}. {}, {} — {}, {}",
            i + 1,
            favorite.name,
            favorite.country,
            units::format_temperature(favorite.temp, system),
            favorite.description,
        );
    }
}
