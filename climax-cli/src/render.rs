//! Terminal rendering of the lookup state.

use climax_core::{ForecastEntry, LookupState, WeatherSnapshot};

pub const LOADING_TEXT: &str = "Fetching weather data...";
pub const IDLE_TEXT: &str = "Enter a city name to look up the weather.";

pub fn render(state: &LookupState) -> String {
    match state {
        LookupState::Idle => IDLE_TEXT.to_string(),
        LookupState::Loading => LOADING_TEXT.to_string(),
        LookupState::Failure(message) => format!("Error: {message}"),
        LookupState::Success(snapshot) => render_snapshot(snapshot),
    }
}

fn render_snapshot(snapshot: &WeatherSnapshot) -> String {
    let location = if snapshot.country.is_empty() {
        snapshot.location_name.clone()
    } else {
        format!("{}, {}", snapshot.location_name, snapshot.country)
    };

    let mut lines = vec![
        location,
        format!(
            "{}  {}°C  {}",
            snapshot.condition.icon().glyph(),
            snapshot.display_temperature(),
            snapshot.description
        ),
        format!("Wind: {} m/s", snapshot.wind_speed_mps),
        format!("Humidity: {}%", snapshot.humidity_pct),
    ];

    if snapshot.has_forecast() {
        lines.push(String::new());
        lines.push(render_forecast(&snapshot.forecast));
    }

    lines.join("\n")
}

fn render_forecast(entries: &[ForecastEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} {} {}°C",
                entry.date.format("%a"),
                entry.condition.icon().glyph(),
                entry.display_temperature()
            )
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}
