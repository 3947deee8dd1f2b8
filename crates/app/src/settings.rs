//! Runtime settings.
//!
//! Values are layered: built-in defaults, then the optional TOML file
//! (`settings.toml` unless `--config` says otherwise), then `SPENDWISE__*`
//! environment variables, then command-line flags.

use clap::Parser;
use config::ConfigError;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
            database: Database::Memory,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "spendwise", about = "Personal expense and budget tracking server")]
struct Args {
    /// Optional settings file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings = Self::load(config_path)?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }

    fn load(path: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("SPENDWISE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
