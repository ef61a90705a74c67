use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use onecall_core::{
    Config, CurrentWeatherSource, OneCallClient, OneCallRequest, Units, client::client_from_config,
    decode_current, decode_one_call,
};
use std::{fs, path::PathBuf};
use tracing::{debug, info};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "onecall", version, about = "OpenWeatherMap OneCall current weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, unit system and language.
    Configure,

    /// Fetch current weather for a coordinate.
    Current {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Overrides the configured unit system.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,

        /// Overrides the configured language.
        #[arg(long)]
        lang: Option<String>,

        /// Overrides the configured API key.
        #[arg(long, env = "OWM_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Decode a saved OneCall response file.
    Decode {
        path: PathBuf,

        /// The file holds only the `current` object.
        #[arg(long)]
        fragment: bool,

        /// Unit system the response was requested in, for labels.
        #[arg(long, value_parser = parse_units, default_value = "metric")]
        units: Units,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn parse_units(s: &str) -> Result<Units, String> {
    Units::try_from(s).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { lat, lon, units, lang, api_key, json } => {
                let mut config = Config::load()?;
                if let Some(key) = api_key {
                    config.set_api_key(key);
                }

                let mut request = OneCallRequest::from_config(lat, lon, &config);
                if let Some(units) = units {
                    request.units = units;
                }
                if lang.is_some() {
                    request.lang = lang;
                }

                let client: OneCallClient = client_from_config(&config)?;
                let current = client.fetch_current(&request).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&current)?);
                } else {
                    println!("Current weather at {lat}, {lon}");
                    print!("{}", render::current(&current, request.units));
                }
                Ok(())
            }
            Command::Decode { path, fragment, units, json } => {
                let body = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                debug!(path = %path.display(), fragment, "decoding file");

                if fragment {
                    let current = decode_current(&body)
                        .with_context(|| format!("Failed to decode {}", path.display()))?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&current)?);
                    } else {
                        print!("{}", render::current(&current, units));
                    }
                } else {
                    let one_call = decode_one_call(&body)
                        .with_context(|| format!("Failed to decode {}", path.display()))?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&one_call)?);
                    } else {
                        print!("{}", render::one_call(&one_call, units));
                    }
                }
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key);

    let start = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Unit system:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    let lang = Text::new("Language code (empty for English):")
        .with_default(config.lang.as_deref().unwrap_or(""))
        .prompt()?;
    config.lang = Some(lang.trim().to_string()).filter(|l| !l.is_empty());

    let path = config.save()?;
    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}
