use std::sync::Arc;
use std::time::Duration;

use crate::config::EnvironmentProvider;
use crate::config::errors::ApplicationError;

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

/// Specification of a single setting: environment override, then default
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Load the setting, recording where the value came from
    ///
    /// A value from the environment wins over the default. Both are run
    /// through the same validation rules.
    pub fn load_setting_with_source(&self) -> Result<ConfigValue, ApplicationError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;

                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                });
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, self.setting_name())?;

            return Ok(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            });
        }

        if self.required {
            return Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(ConfigValue {
            value: String::new(),
            source: ConfigValueSource::Default,
        })
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    /// Parse a port number, rejecting 0
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value.trim().parse::<u16>().map_err(|e| ApplicationError::ParseError {
            setting_name: setting_name.to_string(),
            error: format!("Expected port number, got '{}': {}", value, e),
        })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }

    /// Parse a duration given in whole milliseconds
    ///
    /// # Returns
    /// * `Ok(None)` - The value was 0, meaning "no limit"
    /// * `Ok(Some(Duration))` - Parsed duration
    /// * `Err(ApplicationError)` - Not a non-negative integer
    pub fn parse_duration_millis(
        value: &str,
        setting_name: &str,
    ) -> Result<Option<Duration>, ApplicationError> {
        let millis = value.trim().parse::<u64>().map_err(|e| ApplicationError::ParseError {
            setting_name: setting_name.to_string(),
            error: format!("Expected non-negative integer for milliseconds, got '{}': {}", value, e),
        })?;

        Ok((millis > 0).then(|| Duration::from_millis(millis)))
    }

    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value
            .parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate an IPv4 address (4 dot-separated integers 0-255, no leading zeros)
    pub fn validate_ipv4_address(value: &str) -> Result<(), String> {
        let parts: Vec<&str> = value.split('.').collect();

        if parts.len() != 4 {
            return Err(format!(
                "IPv4 address must have exactly 4 parts separated by dots, got {}",
                parts.len()
            ));
        }

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(format!("IPv4 address part {} cannot be empty", i + 1));
            }
            if part.len() > 1 && part.starts_with('0') {
                return Err(format!(
                    "IPv4 address part {} cannot have leading zeros: '{}'",
                    i + 1,
                    part
                ));
            }

            let octet = part
                .parse::<u16>()
                .map_err(|_| format!("IPv4 address part {} must be a number: '{}'", i + 1, part))?;
            if octet > 255 {
                return Err(format!(
                    "IPv4 address part {} must be between 0-255, got {}",
                    i + 1,
                    octet
                ));
            }
        }

        Ok(())
    }

    /// Validate a host address: IPv4, IPv6 or a hostname without whitespace
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.contains(':') {
            if value.starts_with('[') && value.ends_with(']') {
                let inner = &value[1..value.len() - 1];
                if inner.is_empty() || !inner.contains(':') {
                    return Err("Invalid IPv6 address format".to_string());
                }
            }
            return Ok(());
        }

        if value == "[]" {
            return Err("Invalid IPv6 address format".to_string());
        }

        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() == 4
            && parts
                .iter()
                .all(|part| part.chars().all(|c| c.is_ascii_digit()))
        {
            return Self::validate_ipv4_address(value);
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn spec_with(vars: &[(&str, &str)]) -> ConfigSpec {
        ConfigSpec::new(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_load_setting_with_source_env_override() {
        let spec = spec_with(&[("TEST_SETTING", "env_value")])
            .env_override("TEST_SETTING")
            .default_value("default_value");

        let result = spec.load_setting_with_source().unwrap();

        assert_eq!(result.value, "env_value");
        assert_eq!(
            result.source,
            ConfigValueSource::EnvironmentVariable {
                name: "TEST_SETTING".to_string()
            }
        );
    }

    #[test]
    fn test_load_setting_with_source_default() {
        let spec = spec_with(&[])
            .env_override("TEST_SETTING")
            .default_value("default_value");

        let result = spec.load_setting_with_source().unwrap();

        assert_eq!(result.value, "default_value");
        assert_eq!(result.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_load_setting_with_source_validation() {
        let spec = spec_with(&[("TEST_SETTING", "short")])
            .env_override("TEST_SETTING")
            .min_length(10);

        match spec.load_setting_with_source().unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "TEST_SETTING");
                assert!(reason.contains("at least 10 characters"));
            }
            other => panic!("Expected InvalidSetting error, got {:?}", other),
        }
    }

    #[test]
    fn test_required_setting_without_value_fails() {
        let spec = spec_with(&[]).env_override("MUST_EXIST").required(true);

        assert!(matches!(
            spec.load_setting_with_source(),
            Err(ApplicationError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(ConfigSpec::parse_port("8080", "PORT").unwrap(), 8080);
        assert_eq!(ConfigSpec::parse_port(" 443 ", "PORT").unwrap(), 443);
        assert!(ConfigSpec::parse_port("0", "PORT").is_err());
        assert!(ConfigSpec::parse_port("65536", "PORT").is_err());
        assert!(ConfigSpec::parse_port("http", "PORT").is_err());
    }

    #[test]
    fn test_parse_duration_millis() {
        assert_eq!(
            ConfigSpec::parse_duration_millis("250", "T").unwrap(),
            Some(Duration::from_millis(250))
        );
        assert_eq!(ConfigSpec::parse_duration_millis("0", "T").unwrap(), None);
        assert!(ConfigSpec::parse_duration_millis("-5", "T").is_err());
        assert!(ConfigSpec::parse_duration_millis("5s", "T").is_err());
    }

    #[test]
    fn test_validate_host_address() {
        assert!(ConfigSpec::validate_host_address("0.0.0.0").is_ok());
        assert!(ConfigSpec::validate_host_address("localhost").is_ok());
        assert!(ConfigSpec::validate_host_address("example.com").is_ok());
        assert!(ConfigSpec::validate_host_address("[::1]").is_ok());
        assert!(ConfigSpec::validate_host_address("").is_err());
        assert!(ConfigSpec::validate_host_address("[]").is_err());
        assert!(ConfigSpec::validate_host_address("256.0.0.1").is_err());
        assert!(ConfigSpec::validate_host_address("01.0.0.1").is_err());
        assert!(ConfigSpec::validate_host_address("my host").is_err());
    }

    #[test]
    fn test_validate_port_range() {
        assert!(ConfigSpec::validate_port_range("3000", 1, 65535).is_ok());
        assert!(ConfigSpec::validate_port_range("0", 1, 65535).is_err());
        assert!(ConfigSpec::validate_port_range("abc", 1, 65535).is_err());
    }
}
