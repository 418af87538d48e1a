//! Handles settings for the application.
//!
//! Settings are read from `settings.toml` (or the file passed with
//! `--config`) and overridden by environment variables prefixed with
//! `OPENACCT_`, using `__` between nested keys, e.g.
//! `OPENACCT_SERVER__PORT=8080`.
use clap::Parser;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Parser)]
#[command(name = "openacct", version)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "OPENACCT_CONFIG")]
    pub config: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level applied to the workspace crates.
    pub level: String,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    /// Path of the SQLite file, created if missing.
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new(args: &Args) -> Result<Self, ConfigError> {
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let file = File::with_name(path).required(args.config.is_some());

        Self::from_builder(Config::builder().add_source(file))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.database", "memory")?
            .add_source(
                Environment::with_prefix("OPENACCT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

impl Database {
    /// SeaORM connection URL.
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}
