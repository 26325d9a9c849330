//! OpenWeather current-weather layout (`main`, `weather`, `wind`, `sys`).

use serde::Deserialize;

use crate::{condition::ConditionCode, error::LookupError, model::WeatherSnapshot};

#[derive(Debug, Deserialize)]
struct FlatMain {
    temp: f64,
    #[serde(deserialize_with = "super::humidity_pct")]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct FlatWeather {
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlatWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct FlatSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlatResponse {
    name: String,
    #[serde(default)]
    sys: FlatSys,
    main: FlatMain,
    #[serde(default)]
    weather: Vec<FlatWeather>,
    wind: FlatWind,
}

pub fn parse(body: &str) -> Result<WeatherSnapshot, LookupError> {
    let parsed: FlatResponse = serde_json::from_str(body).map_err(LookupError::parse)?;

    let (description, condition) = match parsed.weather.into_iter().next() {
        Some(w) => {
            let condition = ConditionCode::from(w.icon.as_deref());
            (w.description, condition)
        }
        None => ("Unknown".to_string(), ConditionCode::Unrecognized),
    };

    Ok(WeatherSnapshot {
        location_name: parsed.name,
        country: parsed.sys.country.unwrap_or_default(),
        temperature_c: parsed.main.temp,
        description,
        wind_speed_mps: parsed.wind.speed,
        humidity_pct: parsed.main.humidity,
        condition,
        forecast: Vec::new(),
    })
}
