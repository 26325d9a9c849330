use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{condition::ConditionCode, error::LookupError};

/// A city name that is safe to send to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim the raw input; blank input is rejected.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsed weather result, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub description: String,
    pub wind_speed_mps: f64,
    pub humidity_pct: u8,
    pub condition: ConditionCode,
    /// Empty when the provider shape carries no forecast.
    pub forecast: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub condition: ConditionCode,
}

impl WeatherSnapshot {
    pub fn display_temperature(&self) -> i64 {
        round_half_up(self.temperature_c)
    }

    pub fn has_forecast(&self) -> bool {
        !self.forecast.is_empty()
    }
}

impl ForecastEntry {
    pub fn display_temperature(&self) -> i64 {
        round_half_up(self.temperature_c)
    }
}

/// Round to the nearest integer with halves going up (-2.5 -> -2).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
