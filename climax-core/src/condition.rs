//! Provider condition codes and the icon each one is displayed with.

use serde::{Deserialize, Serialize};

/// Condition reported by the provider, decoded from icon codes like `"10d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConditionCode {
    ClearSky,
    FewClouds,
    ScatteredClouds,
    BrokenClouds,
    ShowerRain,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    #[default]
    Unrecognized,
}

/// Display variant picked for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherIcon {
    #[default]
    Sun,
    Cloud,
    CloudRain,
    Thunderstorm,
    Snow,
}

impl ConditionCode {
    /// Decode a provider icon code. The trailing day/night letter is ignored.
    pub fn from_icon(code: &str) -> Self {
        let code = code.trim();
        let digits = code.strip_suffix(['d', 'n']).unwrap_or(code);
        match digits {
            "01" => Self::ClearSky,
            "02" => Self::FewClouds,
            "03" => Self::ScatteredClouds,
            "04" => Self::BrokenClouds,
            "09" => Self::ShowerRain,
            "10" => Self::Rain,
            "11" => Self::Thunderstorm,
            "13" => Self::Snow,
            "50" => Self::Mist,
            _ => Self::Unrecognized,
        }
    }

    pub fn icon(self) -> WeatherIcon {
        match self {
            Self::ClearSky => WeatherIcon::Sun,
            Self::FewClouds | Self::ScatteredClouds | Self::BrokenClouds => WeatherIcon::Cloud,
            Self::ShowerRain | Self::Rain => WeatherIcon::CloudRain,
            Self::Thunderstorm => WeatherIcon::Thunderstorm,
            Self::Snow => WeatherIcon::Snow,
            Self::Mist | Self::Unrecognized => WeatherIcon::default(),
        }
    }
}

impl From<Option<&str>> for ConditionCode {
    fn from(code: Option<&str>) -> Self {
        code.map(Self::from_icon).unwrap_or_default()
    }
}

impl WeatherIcon {
    /// Single-glyph rendering for terminals.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Cloud => "☁",
            Self::CloudRain => "🌧",
            Self::Thunderstorm => "⛈",
            Self::Snow => "❄",
        }
    }
}
