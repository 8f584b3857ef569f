//! Error taxonomy for the Landfiles client
//!
//! - Transport failures (`Transport`, `Status`, `Api`) are never retried
//! - `Authentication` is raised while building a client
//! - `MalformedRecord` aborts record construction entirely

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LandfilesError>;

#[derive(Error, Debug)]
pub enum LandfilesError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("API error from {endpoint}: {body}")]
    Api {
        endpoint: String,
        body: serde_json::Value,
    },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Malformed record ({context}): {reason}")]
    MalformedRecord { context: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LandfilesError {
    pub(crate) fn malformed(context: impl Into<String>, reason: impl ToString) -> Self {
        LandfilesError::MalformedRecord {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn missing_key(context: impl Into<String>, key: &str) -> Self {
        Self::malformed(context, format!("missing field `{}`", key))
    }

    /// True for network, HTTP status and API-body failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LandfilesError::Transport(_) | LandfilesError::Status { .. } | LandfilesError::Api { .. }
        )
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_category() {
        let status = LandfilesError::Status {
            endpoint: "/groups/me".to_string(),
            status: 502,
            body: String::new(),
        };
        assert!(status.is_transport());

        let api = LandfilesError::Api {
            endpoint: "/groups/me".to_string(),
            body: serde_json::json!({"error": "unauthorized"}),
        };
        assert!(api.is_transport());

        assert!(!LandfilesError::missing_key("observation", "date").is_transport());
        assert!(!LandfilesError::Authentication("no token".to_string()).is_transport());
    }

    #[test]
    fn test_malformed_message_names_key() {
        let err = LandfilesError::missing_key("observation o1", "date");
        assert_eq!(
            err.to_string(),
            "Malformed record (observation o1): missing field `date`"
        );
    }
}
