//! OAuth2 password grant against the Landfiles token endpoint

use crate::{
    config::ClientConfig,
    error::{LandfilesError, Result},
};
use serde_json::Value;
use std::fmt;

pub const TOKEN_ENDPOINT: &str = "/authenticationservice/auth/oauth/token";

/// Credentials accepted by the token endpoint
#[derive(Clone, PartialEq)]
pub enum Credentials {
    /// Client id/secret sent as HTTP basic auth and in the form body
    ClientCredentials {
        client_id: String,
        client_secret: String,
        username: String,
        password: String,
    },
    /// Pre-encoded `Authorization: Basic` token issued for the deployment
    BasicToken {
        username: String,
        password: String,
        basic_token: String,
    },
}

impl Credentials {
    pub fn username(&self) -> &str {
        match self {
            Credentials::ClientCredentials { username, .. } => username,
            Credentials::BasicToken { username, .. } => username,
        }
    }

    /// Form body for the password grant
    pub fn form(&self) -> Vec<(&'static str, String)> {
        match self {
            Credentials::ClientCredentials {
                client_id,
                client_secret,
                username,
                password,
            } => vec![
                ("client_id", client_id.clone()),
                ("client_secret", client_secret.clone()),
                ("username", username.clone()),
                ("password", password.clone()),
                ("grant_type", "password".to_string()),
            ],
            Credentials::BasicToken {
                username, password, ..
            } => vec![
                ("username", username.clone()),
                ("password", password.clone()),
                ("grant_type", "password".to_string()),
            ],
        }
    }
}

// Secrets stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ClientCredentials {
                client_id, username, ..
            } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::BasicToken { username, .. } => f
                .debug_struct("BasicToken")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// Run the password grant and return the bearer token
pub async fn request_token(
    client: &reqwest::Client,
    config: &ClientConfig,
    credentials: &Credentials,
) -> Result<String> {
    let url = config.build_url(TOKEN_ENDPOINT);
    log::debug!("Requesting access token for {}", credentials.username());

    let request = client.post(&url).form(&credentials.form());
    let request = match credentials {
        Credentials::ClientCredentials {
            client_id,
            client_secret,
            ..
        } => request.basic_auth(client_id, Some(client_secret)),
        Credentials::BasicToken { basic_token, .. } => {
            request.header(reqwest::header::AUTHORIZATION, format!("Basic {}", basic_token))
        }
    };

    let response = request.send().await?;
    let status = response.status();
    let body: Value = response.json().await.map_err(|e| {
        LandfilesError::Authentication(format!("token endpoint returned HTTP {}: {}", status, e))
    })?;

    let token = extract_access_token(&body)?;
    log::info!("Authenticated as {}", credentials.username());
    Ok(token)
}

/// Pull `access_token` out of a token endpoint response
pub fn extract_access_token(body: &Value) -> Result<String> {
    body.get("access_token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            LandfilesError::Authentication(format!(
                "'access_token' key missing in the API response: {}",
                body
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_access_token() {
        let body = json!({"access_token": "abc", "token_type": "bearer", "expires_in": 3600});
        assert_eq!(extract_access_token(&body).unwrap(), "abc");
    }

    #[test]
    fn test_missing_access_token() {
        let body = json!({"error": "invalid_grant", "error_description": "Bad credentials"});
        let err = extract_access_token(&body).unwrap_err();
        assert!(matches!(err, LandfilesError::Authentication(_)));
        assert!(err.to_string().contains("invalid_grant"));

        assert!(extract_access_token(&json!({"access_token": 42})).is_err());
    }

    #[test]
    fn test_password_grant_forms() {
        let client = Credentials::ClientCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            username: "farmer".to_string(),
            password: "pw".to_string(),
        };
        let form = client.form();
        assert_eq!(form.len(), 5);
        assert!(form.contains(&("grant_type", "password".to_string())));
        assert!(form.contains(&("client_secret", "secret".to_string())));

        let basic = Credentials::BasicToken {
            username: "farmer".to_string(),
            password: "pw".to_string(),
            basic_token: "dG9rZW4=".to_string(),
        };
        let form = basic.form();
        assert_eq!(form.len(), 3);
        assert!(!form.iter().any(|(k, _)| *k == "client_id"));
        assert_eq!(basic.username(), "farmer");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::ClientCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            username: "farmer".to_string(),
            password: "pw".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("farmer"));
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("pw"));
    }
}
