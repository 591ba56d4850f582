use core_config::{ConfigError, FromEnv, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    /// `None` when `DATABASE_URL` or `DATABASE_NAME` is missing; the service
    /// then runs without a store.
    pub mongodb: Option<MongoConfig>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let mongodb = match MongoConfig::from_env() {
            Ok(config) => Some(config.with_app_name(env!("CARGO_PKG_NAME"))),
            Err(ConfigError::MissingEnvVar(_)) => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            environment,
            server,
            mongodb,
        })
    }
}
