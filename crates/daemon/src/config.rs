//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file (`QFLOW_CONFIG`, default `qflow.toml`), then `QFLOW_*` environment
//! variables.
//!
//! ```text
//! QFLOW_DATABASE_URL=sqlite:///var/lib/qflow/qflow.db \
//! QFLOW_PORT=8080 \
//! QFLOW_CORS_ORIGIN=https://queue.example.org \
//!     ./qflow-server
//! ```

use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use directories::ProjectDirs;
use qflow_api_http::{CorsConfig, HttpServerConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "qflow.toml";
const DEFAULT_DB_FILE: &str = "qflow.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub cors_allow_credentials: bool,
}

impl ServerConfig {
    /// Load from defaults, config file and environment
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("QFLOW_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let builder = Self::defaults()?
            .add_source(File::from(Path::new(&config_file)).required(false))
            .add_source(environment());

        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let cors = CorsConfig::default();

        Ok(Config::builder()
            .set_default("database_url", default_database_url())?
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("cors_origin", cors.allowed_origin)?
            .set_default("cors_allow_credentials", cors.allow_credentials)?)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn http(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors: CorsConfig {
                allowed_origin: self.cors_origin.clone(),
                allow_credentials: self.cors_allow_credentials,
            },
        }
    }

    /// On-disk database file, if the URL names one
    pub fn database_file(&self) -> Option<PathBuf> {
        let url = self.database_url.as_str();
        if url.contains(":memory:") || url.contains("mode=memory") {
            return None;
        }

        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        let path = path.split('?').next().unwrap_or(path);

        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

/// `QFLOW_PORT` -> `port`, `QFLOW_CORS_ORIGIN` -> `cors_origin`, ...
fn environment() -> Environment {
    Environment::with_prefix("QFLOW").try_parsing(true)
}

/// `<platform data dir>/qflow.db`, or `./qflow.db` when no home directory is known
fn default_database_url() -> String {
    ProjectDirs::from("", "", "qflow")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_builder(ServerConfig::defaults().unwrap()).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert!(config.cors_allow_credentials);
        assert!(config.database_url.ends_with("qflow.db"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            database_url = "sqlite::memory:"
            port = 9090
            cors_origin = "https://queue.example.org/"
        "#;
        let builder = ServerConfig::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml));
        let config = ServerConfig::from_builder(builder).unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_file(), None);

        let http = config.http();
        assert_eq!(http.port, 9090);
        assert_eq!(http.cors.normalized_origin(), "https://queue.example.org");
    }

    #[test]
    fn test_environment_overrides_file() {
        let toml = r#"
            host = "0.0.0.0"
            port = 9090
        "#;
        let mut vars = Map::new();
        vars.insert("QFLOW_PORT".to_string(), "9191".to_string());
        vars.insert(
            "QFLOW_CORS_ORIGIN".to_string(),
            "https://desk.example.org".to_string(),
        );
        vars.insert(
            "QFLOW_CORS_ALLOW_CREDENTIALS".to_string(),
            "false".to_string(),
        );

        let builder = ServerConfig::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(environment().source(Some(vars)));
        let config = ServerConfig::from_builder(builder).unwrap();

        assert_eq!(config.port, 9191);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.cors_origin, "https://desk.example.org");
        assert!(!config.cors_allow_credentials);
    }

    #[test]
    fn test_database_file_from_url() {
        let mut config = ServerConfig::from_builder(ServerConfig::defaults().unwrap()).unwrap();

        config.database_url = "sqlite:///var/lib/qflow/qflow.db?mode=rwc".to_string();
        assert_eq!(
            config.database_file(),
            Some(PathBuf::from("/var/lib/qflow/qflow.db"))
        );

        config.database_url = "data/queue.db".to_string();
        assert_eq!(config.database_file(), Some(PathBuf::from("data/queue.db")));

        config.database_url = ":memory:".to_string();
        assert_eq!(config.database_file(), None);
    }
}
