use crate::error::ConfigError;
use std::{env, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.landfiles.fr/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, passed explicitly at client construction
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root, without trailing slash (endpoints start with `/`)
    pub base_url: String,
    /// Request timeout applied by the HTTP client
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `LANDFILES_BASE_URL` (default: https://api.landfiles.fr/api)
    /// - `LANDFILES_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(
            lookup("LANDFILES_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;

        let timeout_secs = match lookup("LANDFILES_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "LANDFILES_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn normalize_base_url(url: String) -> Result<String, ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidValue(
            "LANDFILES_BASE_URL must start with http:// or https://".to_string(),
        ));
    }
    Ok(url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let env = vars(&[]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_custom_config() {
        let env = vars(&[
            ("LANDFILES_BASE_URL", "http://localhost:8080/api/"),
            ("LANDFILES_TIMEOUT_SECS", "5"),
        ]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.build_url("/landfilesservice/v1/farms/me"),
            "http://localhost:8080/api/landfilesservice/v1/farms/me"
        );
    }

    #[test]
    fn test_invalid_values() {
        let env = vars(&[("LANDFILES_BASE_URL", "api.landfiles.fr")]);
        assert!(matches!(
            ClientConfig::from_vars(|k| env.get(k).cloned()),
            Err(ConfigError::InvalidValue(_))
        ));

        let env = vars(&[("LANDFILES_TIMEOUT_SECS", "soon")]);
        assert!(matches!(
            ClientConfig::from_vars(|k| env.get(k).cloned()),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
