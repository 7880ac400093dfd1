use std::str;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[derive(Debug, Deserialize)]
#[allow(unused)]
pub struct Cors {
    /// Origins allowed to read responses cross-origin. `*` allows any.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[allow(unused)]
pub struct Settings {
    #[serde(default)]
    pub cors: Cors,
}

impl Settings {
    /// Loads settings from the TOML file embedded at build time.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the embedded TOML fails to parse.
    pub fn new() -> Result<Self, ConfigError> {
        let toml_bytes = include_bytes!("../../../where-am-i.toml");
        let toml_str = str::from_utf8(toml_bytes).expect("embedded TOML is valid UTF-8");

        Self::from_toml(toml_str)
    }

    /// Parses settings from a TOML string, with environment overrides
    /// applied (`WHERE_AM_I` prefix, `__` separator, comma-separated lists).
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or a value fails to
    /// deserialize.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let environment = Environment::default()
            .prefix("WHERE_AM_I")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors.allowed_origins");

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()?;

        // You can deserialize (and thus freeze) the entire configuration as
        config.try_deserialize()
    }
}
