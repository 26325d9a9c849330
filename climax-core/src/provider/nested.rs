//! Body layout with `location`, `current` and an optional `forecast` list.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::{
    condition::ConditionCode,
    error::LookupError,
    model::{ForecastEntry, WeatherSnapshot},
};

#[derive(Debug, Deserialize)]
struct NestedLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct NestedCurrent {
    temp: f64,
    description: String,
    wind_speed: f64,
    #[serde(deserialize_with = "super::humidity_pct")]
    humidity: u8,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedForecast {
    date: String,
    temp: f64,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedResponse {
    location: NestedLocation,
    current: NestedCurrent,
    #[serde(default)]
    forecast: Vec<NestedForecast>,
}

pub fn parse(body: &str) -> Result<WeatherSnapshot, LookupError> {
    let parsed: NestedResponse = serde_json::from_str(body).map_err(LookupError::parse)?;

    let forecast = parsed
        .forecast
        .into_iter()
        .map(|entry| {
            Ok(ForecastEntry {
                date: parse_date(&entry.date)?,
                temperature_c: entry.temp,
                condition: ConditionCode::from(entry.icon.as_deref()),
            })
        })
        .collect::<Result<Vec<_>, LookupError>>()?;

    Ok(WeatherSnapshot {
        location_name: parsed.location.name,
        country: parsed.location.country,
        temperature_c: parsed.current.temp,
        description: parsed.current.description,
        wind_speed_mps: parsed.current.wind_speed,
        humidity_pct: parsed.current.humidity,
        condition: ConditionCode::from(parsed.current.icon.as_deref()),
        forecast,
    })
}

/// Accepts `2024-05-01`, `2024-05-01 12:00:00` and RFC 3339 timestamps.
fn parse_date(raw: &str) -> Result<NaiveDate, LookupError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| LookupError::parse(format!("invalid forecast date '{raw}'")))
}
