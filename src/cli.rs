// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line interface for `rigelctl`.
//!
//! The binary in `src/bin/rigelctl.rs` only parses [`Cli`] and calls
//! [`Cli::run`]. Commands write their output to any [`Write`] so they can be
//! exercised against an in-memory client.

use crate::domain::{ConfigError, ConfigService, Field, Result};
use crate::service::Rigel;
use crate::settings::{Backend, ClientSettings};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Manage rigel schemas and configuration values.
#[derive(Debug, Parser)]
#[command(name = "rigelctl", version, about)]
pub struct Cli {
    /// Connection settings
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Flags overriding the settings file and `RIGEL_*` environment.
#[derive(Debug, Default, Args)]
pub struct ConnectionArgs {
    /// Settings file (defaults to the OS config dir's rigel/rigelctl.yaml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Comma separated backend endpoints
    #[arg(long, value_delimiter = ',', value_name = "ENDPOINTS", global = true)]
    pub endpoints: Vec<String>,

    /// Key prefix
    #[arg(long, global = true)]
    pub prefix: Option<String>,
}

impl ConnectionArgs {
    /// Loads settings and applies these flags on top.
    pub fn settings(&self) -> Result<ClientSettings> {
        let settings = ClientSettings::load(self.config.as_deref())?;
        Ok(self.apply(settings))
    }

    fn apply(&self, mut settings: ClientSettings) -> ClientSettings {
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
        if !self.endpoints.is_empty() {
            settings.endpoints = self.endpoints.clone();
        }
        if let Some(prefix) = &self.prefix {
            settings.prefix = prefix.clone();
        }
        settings
    }
}

/// `rigelctl` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register the field list of a schema version
    AddSchema {
        /// Schema name
        name: String,
        /// Schema version
        version: u32,
        /// Field list as JSON, e.g. '[{"name":"port","type":"int"}]'
        #[arg(required_unless_present = "file")]
        fields: Option<String>,
        /// Read the field list from a YAML or JSON file
        #[arg(long, value_name = "FILE", conflicts_with = "fields")]
        file: Option<PathBuf>,
    },
    /// Print the field list of a schema version as JSON
    GetSchema {
        /// Schema name
        name: String,
        /// Schema version
        version: u32,
    },
    /// Validate and store a configuration value
    Set {
        /// Schema name
        name: String,
        /// Schema version
        version: u32,
        /// Field name
        field: String,
        /// Raw value
        value: String,
    },
    /// Print the raw stored value of a field
    Get {
        /// Schema name
        name: String,
        /// Schema version
        version: u32,
        /// Field name
        field: String,
    },
    /// Print every field of a schema version, typed, as JSON
    Show {
        /// Schema name
        name: String,
        /// Schema version
        version: u32,
    },
}

impl Cli {
    /// Connects using the resolved settings and runs the command, writing to
    /// stdout.
    pub fn run(&self) -> Result<()> {
        let settings = self.connection.settings()?;
        let rigel = settings.connect()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.command.execute(&rigel, &mut out)
    }
}

impl Command {
    /// Runs the command against `rigel`.
    pub fn execute<W: Write>(&self, rigel: &Rigel, out: &mut W) -> Result<()> {
        match self {
            Command::AddSchema {
                name,
                version,
                fields,
                file,
            } => {
                let fields = match (fields, file) {
                    (_, Some(path)) => read_fields_file(path)?,
                    (Some(json), None) => parse_fields(json)?,
                    (None, None) => {
                        return Err(ConfigError::SettingsError {
                            message: "No field list given".to_string(),
                            source: None,
                        })
                    }
                };
                rigel.add_schema(name, *version, &fields)?;
            }
            Command::GetSchema { name, version } => {
                let schema = rigel.get_schema(name, *version)?;
                let json = serde_json::to_string_pretty(&schema.fields).map_err(|e| {
                    ConfigError::EncodeError {
                        message: e.to_string(),
                        source: Some(Box::new(e)),
                    }
                })?;
                writeln!(out, "{}", json)?;
            }
            Command::Set {
                name,
                version,
                field,
                value,
            } => {
                rigel.set_config_value(name, *version, field, value)?;
            }
            Command::Get {
                name,
                version,
                field,
            } => {
                let value = rigel.get_config_value(name, *version, field)?;
                writeln!(out, "{}", value)?;
            }
            Command::Show { name, version } => {
                let map = rigel.resolve(name, *version)?;
                let json = serde_json::to_string_pretty(&map.to_json()).map_err(|e| {
                    ConfigError::EncodeError {
                        message: e.to_string(),
                        source: Some(Box::new(e)),
                    }
                })?;
                writeln!(out, "{}", json)?;
            }
        }
        Ok(())
    }
}

/// Parses a JSON field list given on the command line.
pub fn parse_fields(json: &str) -> Result<Vec<Field>> {
    serde_json::from_str(json).map_err(|e| ConfigError::DecodeError {
        key: "<fields argument>".to_string(),
        message: format!("Invalid field list: {}", e),
        source: Some(Box::new(e)),
    })
}

/// Reads a YAML (or JSON) field list from a file.
pub fn read_fields_file(path: &Path) -> Result<Vec<Field>> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| ConfigError::DecodeError {
        key: path.display().to_string(),
        message: format!("Invalid field list: {}", e),
        source: Some(Box::new(e)),
    })
}

/// Installs a stderr `fmt` subscriber. `RUST_LOG` takes precedence over
/// `verbose`.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rigel={level},rigelctl={level}")));

    // A subscriber may already be set when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
