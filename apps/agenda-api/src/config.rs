use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(env!("CARGO_PKG_NAME"));
        }
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_mongo_uri() {
        temp_env::with_vars(
            [
                ("MONGO_URI", None::<&str>),
                ("MONGODB_URL", None::<&str>),
                ("MONGO_DB", Some("fatec")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGO_URI"));
            },
        );
    }

    #[test]
    fn test_config_requires_mongo_db() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("MONGO_DB", None::<&str>),
                ("MONGODB_DATABASE", None::<&str>),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGO_DB"));
            },
        );
    }

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("MONGO_DB", Some("fatec")),
                ("MONGODB_APP_NAME", None::<&str>),
                ("PORT", None::<&str>),
                ("APP_ENV", None::<&str>),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 4000);
                assert_eq!(config.mongodb.database(), "fatec");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("agenda_api"));
                assert_eq!(config.app.version, "1.0.0");
                assert!(config.environment.is_development());
            },
        );
    }
}
