use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use flightdesk_shared::Masked;
use serde::Deserialize;
use std::env;

const ENV_PREFIX: &str = "FLIGHTDESK";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Flight-data provider (Amadeus Self-Service) settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: Masked<String>,
    /// Currency requested when confirming prices.
    pub currency: String,
    pub max_results: u32,
    pub timeout_seconds: u64,
}

impl Config {
    /// Layers, lowest priority first: built-in defaults, `config/default`,
    /// `config/{RUN_MODE}`, `config/local`, then `FLIGHTDESK__*` variables
    /// (e.g. `FLIGHTDESK__PROVIDER__CLIENT_SECRET`).
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Self::finish(builder)
    }

    /// Defaults overlaid with an inline TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.client_id.trim().is_empty() || self.provider.client_secret.is_blank() {
            return Err(ConfigError::Message(format!(
                "provider credentials are missing; set {0}__PROVIDER__CLIENT_ID and {0}__PROVIDER__CLIENT_SECRET",
                ENV_PREFIX
            )));
        }
        if self.provider.currency.len() != 3 {
            return Err(ConfigError::Message(format!(
                "provider.currency must be a 3-letter ISO code, got {:?}",
                self.provider.currency
            )));
        }
        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("provider.base_url", "https://test.api.amadeus.com")?
        .set_default("provider.client_id", "")?
        .set_default("provider.client_secret", "")?
        .set_default("provider.currency", "IDR")?
        .set_default("provider.max_results", 50)?
        .set_default("provider.timeout_seconds", 30)
}
