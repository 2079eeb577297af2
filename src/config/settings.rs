use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::EnvironmentProvider;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://valuables.db?mode=rwc";

/// Settings the server needs before it can accept requests
pub struct AppSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    request_timeout: Option<Duration>,
}

impl AppSettings {
    /// Load settings through the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value(DEFAULT_DATABASE_URL)
            .min_length(1);

        let host_spec = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address);

        let port_spec = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535));

        let timeout_spec = ConfigSpec::new(env_provider)
            .env_override("REQUEST_TIMEOUT_MS")
            .default_value("5000")
            .min_length(1);

        let database_url = database_url_spec.load_setting_with_source()?.value;
        let server_host = host_spec.load_setting_with_source()?.value;

        let port_value = port_spec.load_setting_with_source()?.value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let timeout_value = timeout_spec.load_setting_with_source()?.value;
        let request_timeout = ConfigSpec::parse_duration_millis(&timeout_value, "REQUEST_TIMEOUT_MS")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            request_timeout,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
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

    /// Per-request deadline; `None` when REQUEST_TIMEOUT_MS is 0
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn load(vars: &[(&str, &str)]) -> Result<AppSettings, ApplicationError> {
        AppSettings::from_env_provider(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_settings_with_all_vars() {
        let settings = load(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("REQUEST_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_host(), "127.0.0.1");
        assert_eq!(settings.server_port(), 8080);
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.request_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_settings_with_defaults() {
        let settings = load(&[]).unwrap();

        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.server_address(), "0.0.0.0:3000");
        assert_eq!(settings.request_timeout(), Some(Duration::from_millis(5000)));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let settings = load(&[("REQUEST_TIMEOUT_MS", "0")]).unwrap();

        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn test_invalid_timeout_fails() {
        match load(&[("REQUEST_TIMEOUT_MS", "soon")]).unwrap_err() {
            ApplicationError::ParseError { setting_name, .. } => {
                assert_eq!(setting_name, "REQUEST_TIMEOUT_MS");
            }
            other => panic!("Expected ParseError for REQUEST_TIMEOUT_MS, got: {:?}", other),
        }
    }

    #[test]
    fn test_empty_database_url_fails_validation() {
        match load(&[("DATABASE_URL", "")]).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "DATABASE_URL");
                assert!(reason.contains("must be at least 1 characters long"));
            }
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_empty_host_fails_validation() {
        match load(&[("HOST", "")]).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "HOST");
                assert!(reason.contains("cannot be empty"));
            }
            other => panic!("Expected InvalidSetting for HOST, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port() {
        match load(&[("PORT", "not_a_number")]).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "PORT");
                assert!(reason.contains("Expected port number between 1 and 65535"));
            }
            other => panic!("Expected InvalidSetting for PORT, got: {:?}", other),
        }
    }

    #[test]
    fn test_zero_port() {
        match load(&[("PORT", "0")]).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "PORT");
                assert!(reason.contains("outside valid range"));
            }
            other => panic!("Expected InvalidSetting for PORT, got: {:?}", other),
        }
    }

    #[test]
    fn test_debug_format() {
        let settings = load(&[("HOST", "localhost")]).unwrap();
        let debug_str = format!("{:?}", settings);

        assert!(debug_str.contains("database_url"));
        assert!(debug_str.contains("localhost"));
        assert!(debug_str.contains("request_timeout"));
    }
}
