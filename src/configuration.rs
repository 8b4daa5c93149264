//! Configurations module.
//!
//! This module includes the `struct`s that describe all the configuration
//! attributes needed to set up the execution and test environments of the
//! newsletter signup application.

use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

/// Top level `struct` for the configuration.
#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub cache: CacheSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Cache backend related configuration.
///
/// # Description
///
/// Pending confirmations live in a TTL-capable key/value cache. The
/// attributes of this `struct` select the backend and tune its behaviour:
/// - [CacheSettings::backend]: `redis` in production, `memory` for tests
///   and single-process deployments.
/// - [CacheSettings::uri]: connection string of the Redis server.
/// - [CacheSettings::confirmation_ttl_seconds]: how long an unconfirmed
///   token stays valid.
/// - [CacheSettings::command_timeout_milliseconds]: upper bound for a single
///   round-trip to the backend.
#[derive(serde::Deserialize, Clone)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    pub uri: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub confirmation_ttl_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub command_timeout_milliseconds: u64,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Redis,
}

impl CacheSettings {
    pub fn confirmation_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.confirmation_ttl_seconds)
    }

    pub fn command_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.command_timeout_milliseconds)
    }
}

pub enum Environment {
    Local,
    Production,
}

/// Function that parses the files with the definition of the configuration
/// `struct`s.
///
/// # Description
///
/// Configuration files are stored within `{app root dir}/configuration`: a
/// `base` file with shared defaults plus one file per environment, selected
/// through the `APP_ENVIRONMENT` variable. Individual settings can be
/// overridden using environment variables, for example
/// `APP_APPLICATION__PORT=5001` sets `Settings.application.port`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();

    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Load the "default" configuration file.
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    // Detect what environment the app is running in.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}
