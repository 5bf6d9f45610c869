use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
    /// Lookup endpoints tried in declared order during location resolution.
    pub location_endpoints: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_cabin_class")]
    pub cabin_class: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_cabin_class() -> String {
    "economy".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of FARESCOUT)
            // Eg.. `FARESCOUT__SERVER__PORT=9090` would set the server port
            .add_source(config::Environment::with_prefix("FARESCOUT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
