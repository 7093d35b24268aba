use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::error::ClientError;

pub const DEFAULT_ENDPOINT: &str = "https://api.onfido.com/v3";

#[derive(Deserialize, Clone, Debug)]
pub struct ClientConfig {
    /// API token, sent as `Authorization: Token token=<token>`.
    #[serde(default)]
    pub token: Option<Secret<String>>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout; `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("onfido-rust/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(Secret::new(token.into())),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Load from an optional `onfido.{toml,yaml,json}` file and `ONFIDO_*`
    /// environment variables (`ONFIDO_TOKEN`, `ONFIDO_ENDPOINT`,
    /// `ONFIDO_TIMEOUT_SECS`, `ONFIDO_USER_AGENT`).
    pub fn load() -> Result<Self, ClientError> {
        Ok(client_core::config::load("onfido", "ONFIDO")?)
    }

    /// Check if a non-empty token is set.
    pub fn is_configured(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        for key in [
            "ONFIDO_TOKEN",
            "ONFIDO_ENDPOINT",
            "ONFIDO_TIMEOUT_SECS",
            "ONFIDO_USER_AGENT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = ClientConfig::new("token-123");
        assert!(config.is_configured());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("onfido-rust/"));
    }

    #[test]
    fn test_empty_token_is_not_configured() {
        assert!(!ClientConfig::new("").is_configured());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert!(config.is_configured());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.is_configured());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("super-secret-token");
        assert!(!format!("{:?}", config).contains("super-secret-token"));
    }

    #[test]
    #[serial]
    fn test_load_from_environment() {
        clear_env();
        env::set_var("ONFIDO_TOKEN", "env-token");
        env::set_var("ONFIDO_ENDPOINT", "http://127.0.0.1:9000/v3");
        env::set_var("ONFIDO_TIMEOUT_SECS", "5");

        let config = ClientConfig::load().unwrap();
        clear_env();

        assert!(config.is_configured());
        assert_eq!(config.token.unwrap().expose_secret(), "env-token");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/v3");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.user_agent.starts_with("onfido-rust/"));
    }

    #[test]
    #[serial]
    fn test_load_without_environment_uses_defaults() {
        clear_env();

        let config = ClientConfig::load().unwrap();

        assert!(!config.is_configured());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 30);
    }
}
