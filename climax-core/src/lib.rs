//! Core library for the `climax` weather client.
//!
//! This crate defines:
//! - Configuration of weather endpoints (profiles)
//! - The provider abstraction and the supported response shapes
//! - Shared domain models (query, snapshot, condition codes)
//! - The lookup controller that keeps view state in sync with one fetch
//!
//! It is used by `climax-cli`, but any other presentation layer can drive
//! [`WeatherLookupController`] the same way.

pub mod action;
pub mod condition;
pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod model;
pub mod provider;
pub mod reducer;
pub mod state;

pub use condition::{ConditionCode, WeatherIcon};
pub use config::{Config, ProviderConfig};
pub use controller::WeatherLookupController;
pub use error::LookupError;
pub use model::{ForecastEntry, Query, WeatherSnapshot};
pub use provider::{
    CityParam, HttpWeatherProvider, ResponseShape, WeatherProvider, provider_from_config,
};
pub use state::LookupState;
