use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
pub struct Args {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub mongodb_url: String,
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Comma separated CORS allow-list.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_name() -> String {
    "germans".to_string()
}

fn default_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

impl Args {
    /// `setup.toml` (optional) overridden by the environment, e.g. `MONGODB_URL`.
    pub fn new() -> Result<Self, handle_errors::Error> {
        let builder = Config::builder()
            .add_source(File::with_name("setup").required(false))
            .add_source(Environment::default().try_parsing(true));
        Args::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, handle_errors::Error> {
        builder
            .build()
            .and_then(|config| config.try_deserialize::<Args>())
            .map_err(handle_errors::Error::ConfigError)
    }

    pub fn origins(&self) -> Vec<&str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}
