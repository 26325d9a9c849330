use crate::{
    config::ProviderConfig,
    error::{FALLBACK_HTTP_MESSAGE, LookupError},
    model::{Query, WeatherSnapshot, round_half_up},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Debug, time::Duration};
use tracing::{debug, instrument, warn};

pub mod flat;
pub mod nested;

/// Response body layout served by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// `location` / `current` / `forecast` objects.
    Nested,
    /// OpenWeather-style `main` / `weather` / `wind` objects, no forecast.
    Flat,
}

impl ResponseShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseShape::Nested => "nested",
            ResponseShape::Flat => "flat",
        }
    }

    pub const fn all() -> &'static [ResponseShape] {
        &[ResponseShape::Nested, ResponseShape::Flat]
    }

    /// Build a snapshot from a success body.
    pub fn parse(&self, body: &str) -> Result<WeatherSnapshot, LookupError> {
        match self {
            ResponseShape::Nested => nested::parse(body),
            ResponseShape::Flat => flat::parse(body),
        }
    }
}

impl std::fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ResponseShape {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "nested" => Ok(ResponseShape::Nested),
            "flat" => Ok(ResponseShape::Flat),
            _ => Err(anyhow::anyhow!(
                "Unknown response shape '{value}'. Supported shapes: nested, flat."
            )),
        }
    }
}

/// Where the city goes in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityParam {
    /// `GET {base_url}?{query_key}={city}`
    #[default]
    Query,
    /// `GET {base_url}/{city}`
    Path,
}

impl TryFrom<&str> for CityParam {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "query" => Ok(CityParam::Query),
            "path" => Ok(CityParam::Path),
            _ => Err(anyhow::anyhow!(
                "Unknown city parameter style '{value}'. Supported styles: query, path."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &Query) -> Result<WeatherSnapshot, LookupError>;
}

/// Provider backed by a plain HTTP GET endpoint.
#[derive(Debug, Clone)]
pub struct HttpWeatherProvider {
    config: ProviderConfig,
    http: Client,
}

impl HttpWeatherProvider {
    pub fn new(config: ProviderConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self { config, http })
    }

    fn request(&self, query: &Query) -> reqwest::RequestBuilder {
        match self.config.city_param {
            CityParam::Query => self
                .http
                .get(&self.config.base_url)
                .query(&[(self.config.query_key.as_str(), query.as_str())]),
            CityParam::Path => {
                let url = format!(
                    "{}/{}",
                    self.config.base_url.trim_end_matches('/'),
                    urlencoding::encode(query.as_str())
                );
                self.http.get(url)
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch(&self, query: &Query) -> Result<WeatherSnapshot, LookupError> {
        debug!(shape = %self.config.shape, base_url = %self.config.base_url, "requesting weather");
        let res = self.request(query).send().await.map_err(|e| {
            warn!(error = %e, "weather request did not reach the provider");
            LookupError::network(e)
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "failed to read weather response body");
            LookupError::network(e)
        })?;

        if !status.is_success() {
            let message = error_message(&body);
            debug!(status = status.as_u16(), %message, "provider rejected lookup");
            return Err(LookupError::Http {
                status: status.as_u16(),
                message,
            });
        }

        self.config.shape.parse(&body).inspect_err(|e| {
            if let LookupError::Parse { detail } = e {
                warn!(%detail, body = %truncate_body(&body), "unexpected weather payload");
            }
        })
    }
}

/// Humidity as any JSON number, rounded and clamped into 0..=100.
pub(crate) fn humidity_pct<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(round_half_up(raw).clamp(0, 100) as u8)
}

/// Human-readable reason from an error payload: `error`, then `message`.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return FALLBACK_HTTP_MESSAGE.to_string();
    };

    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .filter(|msg| !msg.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_HTTP_MESSAGE.to_string())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Construct the HTTP provider for a configured profile.
pub fn provider_from_config(config: &ProviderConfig) -> anyhow::Result<HttpWeatherProvider> {
    if config.base_url.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "Provider base URL is empty.\n\
             Hint: run `climax configure <name> --base-url <url>`."
        ));
    }
    HttpWeatherProvider::new(config.clone())
}
