//! Subscriber client configuration.
//!
//! # Examples
//!
//! ```
//! use websub_client::client::{ClientConfig, FollowRedirects};
//!
//! let config = ClientConfig {
//!     follow_redirects: Some(FollowRedirects { enabled: true, max_count: 3 }),
//!     ..Default::default()
//! };
//! assert_eq!(config.redirect_budget().limit(), 3);
//!
//! let config = ClientConfig::from_json(r#"{"request_timeout_ms": 5000}"#).unwrap();
//! assert_eq!(config.request_timeout_ms, 5000);
//! assert!(config.redirect_budget().is_disabled());
//! ```

use crate::error::{Result, WebSubError};
use crate::types::{AuthConfig, RedirectBudget};
use serde::{Deserialize, Serialize};

/// Configuration for [`SubscriberClient`](super::SubscriberClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Timeout for each HTTP exchange, in milliseconds
    pub request_timeout_ms: u64,
    /// Idle connections kept per host
    pub max_idle_connections: u32,
    /// Proxy for all requests, empty for none
    pub proxy_url: String,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Redirect following; `None` follows no redirects
    pub follow_redirects: Option<FollowRedirects>,
    /// Credentials sent to every hub
    pub auth: Option<AuthConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30_000,
            max_idle_connections: 10,
            proxy_url: String::new(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            follow_redirects: None,
            auth: None,
        }
    }
}

impl ClientConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WebSubError::Config(e.to_string()))
    }

    /// Redirect budget each subscribe or unsubscribe call starts with.
    pub fn redirect_budget(&self) -> RedirectBudget {
        match &self.follow_redirects {
            Some(FollowRedirects {
                enabled: true,
                max_count,
            }) => RedirectBudget::new(*max_count),
            _ => RedirectBudget::disabled(),
        }
    }
}

/// Redirect following settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowRedirects {
    /// Whether 307 and 308 responses are followed
    pub enabled: bool,
    /// Maximum redirects followed per call
    pub max_count: u32,
}

impl Default for FollowRedirects {
    fn default() -> Self {
        FollowRedirects {
            enabled: true,
            max_count: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_follows_no_redirects() {
        let config = ClientConfig::default();
        assert!(config.redirect_budget().is_disabled());
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(config.user_agent.starts_with("websub_client/"));
    }

    #[test]
    fn test_disabled_follow_redirects() {
        let config = ClientConfig {
            follow_redirects: Some(FollowRedirects {
                enabled: false,
                max_count: 10,
            }),
            ..Default::default()
        };
        assert_eq!(config.redirect_budget().remaining(), 0);
    }

    #[test]
    fn test_from_json_with_redirects_and_auth() {
        let config = ClientConfig::from_json(
            r#"{
                "follow_redirects": {"enabled": true},
                "auth": {"type": "bearer", "token": "abc"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.redirect_budget().limit(), 5);
        assert_eq!(
            config.auth,
            Some(AuthConfig::Bearer {
                token: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ClientConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, WebSubError::Config(_)));
    }
}
