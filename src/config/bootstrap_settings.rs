use std::fmt;
use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

const DEFAULT_DATABASE_URL: &str = "sqlite://items.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ALLOW_ORIGIN: &str = "http://localhost:3000";

/// Bootstrap settings for infrastructure configuration
///
/// Loaded once at process startup; all values are validated here so that a
/// misconfigured deployment fails before the server binds.
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    auto_create_schema: bool,
    cors_allow_origin: String,
}

impl BootstrapSettings {
    /// Load bootstrap settings from the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = env_provider
            .get_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(ApplicationError::InvalidSetting {
                setting_name: "DATABASE_URL".to_string(),
                reason: "value cannot be empty".to_string(),
            });
        }

        let server_host = env_provider
            .get_var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        if server_host.trim().is_empty() {
            return Err(ApplicationError::InvalidSetting {
                setting_name: "HOST".to_string(),
                reason: "value cannot be empty".to_string(),
            });
        }

        let server_port = match env_provider.get_var("PORT") {
            Some(raw) => Self::parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let auto_create_schema = match env_provider.get_var("AUTO_CREATE_SCHEMA") {
            Some(raw) => Self::parse_bool("AUTO_CREATE_SCHEMA", &raw)?,
            None => true,
        };

        let cors_allow_origin = env_provider
            .get_var("CORS_ALLOW_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOW_ORIGIN.to_string());

        Ok(Self {
            database_url,
            server_host,
            server_port,
            auto_create_schema,
            cors_allow_origin,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    fn parse_port(raw: &str) -> Result<u16, ApplicationError> {
        let port: u16 = raw.parse().map_err(|_| ApplicationError::ParseError {
            setting_name: "PORT".to_string(),
            error: format!("expected port number between 1 and 65535, got '{}'", raw),
        })?;
        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: "PORT".to_string(),
                reason: "port 0 is outside the valid range 1-65535".to_string(),
            });
        }
        Ok(port)
    }

    fn parse_bool(setting_name: &str, raw: &str) -> Result<bool, ApplicationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("expected boolean, got '{}'", other),
            }),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn auto_create_schema(&self) -> bool {
        self.auto_create_schema
    }

    pub fn cors_allow_origin(&self) -> &str {
        &self.cors_allow_origin
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("auto_create_schema", &self.auto_create_schema)
            .field("cors_allow_origin", &self.cors_allow_origin)
            .finish()
    }
}
