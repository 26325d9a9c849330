use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use climax_core::{
    CityParam, Config, LookupState, ProviderConfig, ResponseShape, WeatherLookupController,
    provider_from_config,
};
use inquire::{InquireError, Select, Text};
use tracing::debug;

use crate::render::{LOADING_TEXT, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "climax", version, about = "Look up the current weather for a city")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add or replace a named weather endpoint.
    Configure {
        /// Profile name, e.g. "local".
        name: String,

        /// Endpoint URL, e.g. "http://localhost/weather". Prompted for if absent.
        #[arg(long)]
        base_url: Option<String>,

        /// Response layout: "nested" or "flat". Prompted for if absent.
        #[arg(long)]
        shape: Option<String>,

        /// Where the city goes: "query" or "path".
        #[arg(long)]
        city_param: Option<String>,

        /// Query-string key for the city.
        #[arg(long)]
        query_key: Option<String>,

        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Make this profile the default.
        #[arg(long)]
        default: bool,
    },

    /// Show the weather for a city.
    Show {
        city: String,

        /// Profile to use instead of the default one.
        #[arg(long)]
        provider: Option<String>,
    },

    /// Prompt for cities until Esc or Ctrl-C.
    Interactive {
        #[arg(long)]
        provider: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command {
            Command::Configure {
                name,
                base_url,
                shape,
                city_param,
                query_key,
                timeout_secs,
                default,
            } => {
                let base_url = match base_url {
                    Some(url) => url,
                    None => Text::new("Base URL:")
                        .with_default("http://localhost/weather")
                        .prompt()
                        .context("Failed to read base URL")?,
                };
                let shape = match shape {
                    Some(shape) => ResponseShape::try_from(shape.as_str())?,
                    None => Select::new("Response shape:", ResponseShape::all().to_vec())
                        .prompt()
                        .context("Failed to read response shape")?,
                };

                let mut provider = ProviderConfig::new(base_url, shape);
                if let Some(city_param) = city_param {
                    provider.city_param = CityParam::try_from(city_param.as_str())?;
                }
                if let Some(query_key) = query_key {
                    provider.query_key = query_key;
                }
                if let Some(timeout_secs) = timeout_secs {
                    provider.timeout_secs = timeout_secs;
                }

                config.upsert_provider(&name, provider);
                if default {
                    config.set_default_provider(&name)?;
                }
                let saved_to = match self.config {
                    Some(path) => {
                        config.save_to(&path)?;
                        path
                    }
                    None => {
                        config.save()?;
                        Config::config_file_path()?
                    }
                };

                println!("Saved provider '{name}' to {}", saved_to.display());
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, provider } => {
                let mut controller = controller(&config, provider.as_deref())?;

                controller.set_query(city);
                if !controller.submit() {
                    anyhow::bail!("City name must not be empty.");
                }
                println!("{LOADING_TEXT}");

                controller.settle().await;
                let state = controller.state();
                println!("{}", render(state));

                Ok(match state {
                    LookupState::Failure(_) => ExitCode::FAILURE,
                    _ => ExitCode::SUCCESS,
                })
            }
            Command::Interactive { provider } => {
                let mut controller = controller(&config, provider.as_deref())?;
                println!("{}", render(controller.state()));

                loop {
                    let input = match Text::new("City:")
                        .with_placeholder("Enter city name")
                        .prompt()
                    {
                        Ok(input) => input,
                        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                            break;
                        }
                        Err(e) => return Err(e).context("Failed to read city name"),
                    };

                    controller.set_query(input);
                    if !controller.submit() {
                        debug!("blank city name, prompting again");
                        continue;
                    }
                    println!("{LOADING_TEXT}");

                    if let Some(state) = controller.settle().await {
                        println!("{}\n", render(state));
                    }
                }

                controller.dispose();
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn controller(config: &Config, provider: Option<&str>) -> anyhow::Result<WeatherLookupController> {
    let provider_config = config.resolve_provider(provider)?;
    let provider = provider_from_config(provider_config)?;
    Ok(WeatherLookupController::new(Arc::new(provider)))
}
