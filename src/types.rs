//! Core WebSub subscriber types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Mode`] | `subscribe` or `unsubscribe` |
//! | [`SubscriptionChangeRequest`] | What the caller wants the hub to do |
//! | [`SubscriptionChangeResponse`] | A hub's acceptance of a request |
//! | [`HubResponse`] | Raw HTTP response returned by a hub |
//! | [`AuthConfig`] | Credentials presented to every hub on the redirect chain |
//! | [`RedirectBudget`] | Redirects one call may still follow |

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription change mode sent as `hub.mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Start receiving notifications for a topic
    Subscribe,
    /// Stop receiving notifications for a topic
    Unsubscribe,
}

impl Mode {
    /// Wire value of `hub.mode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Subscribe => "subscribe",
            Mode::Unsubscribe => "unsubscribe",
        }
    }

    /// Noun used in log and error messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Mode::Subscribe => "subscription",
            Mode::Unsubscribe => "unsubscription",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to change a subscription at a hub.
///
/// `secret` and `lease_seconds` are only sent with [`Mode::Subscribe`]. A secret that is
/// empty or whitespace-only is treated as absent, and a lease of `0` leaves the lease
/// duration up to the hub.
///
/// # Examples
///
/// ```
/// use websub_client::SubscriptionChangeRequest;
///
/// let request = SubscriptionChangeRequest::new(
///     "https://publisher.example/feed",
///     "https://subscriber.example/callback",
/// )
/// .with_secret("s3cr3t")
/// .with_lease_seconds(86_400);
///
/// assert_eq!(request.secret(), Some("s3cr3t"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubscriptionChangeRequest {
    /// Topic URL
    pub topic: String,
    /// Callback URL the hub will deliver to
    pub callback: String,
    /// Shared secret for signed content distribution
    #[serde(default)]
    pub secret: Option<String>,
    /// Requested lease in seconds, `0` for the hub default
    #[serde(default)]
    pub lease_seconds: u64,
}

impl SubscriptionChangeRequest {
    /// Create a request for `topic` delivering to `callback`.
    pub fn new(topic: impl Into<String>, callback: impl Into<String>) -> Self {
        SubscriptionChangeRequest {
            topic: topic.into(),
            callback: callback.into(),
            secret: None,
            lease_seconds: 0,
        }
    }

    /// Set the shared secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set the requested lease duration.
    pub fn with_lease_seconds(mut self, lease_seconds: u64) -> Self {
        self.lease_seconds = lease_seconds;
        self
    }

    /// The secret, or `None` when it is absent, empty or whitespace-only.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The requested lease, or `None` when the hub default applies.
    pub fn lease_seconds(&self) -> Option<u64> {
        (self.lease_seconds != 0).then_some(self.lease_seconds)
    }
}

/// Raw HTTP response returned by a hub.
///
/// The body is read in full before the response is classified.
#[derive(Debug, Clone)]
pub struct HubResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl HubResponse {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        HubResponse {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Body as text, when it is valid UTF-8 and not blank.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body)
            .ok()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// First value of `name` that is valid visible ASCII.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A hub's acceptance of a subscription change request.
#[derive(Debug, Clone)]
pub struct SubscriptionChangeResponse {
    /// Hub that accepted the request, after any redirects
    pub hub: String,
    /// Topic echoed from the request
    pub topic: String,
    /// Response the accepting hub returned
    pub response: HubResponse,
}

/// Credentials sent to the hub.
///
/// Carried unchanged to every hub a request is redirected to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    /// `Authorization: Bearer <token>`
    Bearer {
        /// Bearer token
        token: String,
    },
    /// `Authorization: Basic ...`
    Basic {
        /// User name
        username: String,
        /// Password
        password: String,
    },
}

// Credentials stay out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Number of redirects one subscribe or unsubscribe call may still follow.
///
/// A budget is a plain value: each followed redirect produces a new budget with one
/// fewer redirect remaining, so concurrent calls never share a counter.
///
/// # Examples
///
/// ```
/// use websub_client::RedirectBudget;
///
/// let budget = RedirectBudget::new(1);
/// let next = budget.spend().unwrap();
/// assert_eq!(next.remaining(), 0);
/// assert!(next.spend().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedirectBudget {
    limit: u32,
    remaining: u32,
}

impl RedirectBudget {
    /// A budget allowing `limit` redirects.
    pub fn new(limit: u32) -> Self {
        RedirectBudget {
            limit,
            remaining: limit,
        }
    }

    /// A budget that follows no redirects.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Redirects still allowed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Redirects allowed when the call started.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether redirect following was turned off for this call.
    pub fn is_disabled(&self) -> bool {
        self.limit == 0
    }

    /// Budget after following one redirect, or `None` when none remain.
    #[must_use]
    pub fn spend(self) -> Option<Self> {
        self.remaining.checked_sub(1).map(|remaining| RedirectBudget {
            limit: self.limit,
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_secret_is_absent() {
        let request = SubscriptionChangeRequest::new("t", "c").with_secret("  \t ");
        assert_eq!(request.secret(), None);

        let request = SubscriptionChangeRequest::new("t", "c").with_secret("");
        assert_eq!(request.secret(), None);
    }

    #[test]
    fn test_secret_is_not_trimmed_when_present() {
        let request = SubscriptionChangeRequest::new("t", "c").with_secret(" key ");
        assert_eq!(request.secret(), Some(" key "));
    }

    #[test]
    fn test_zero_lease_is_unspecified() {
        let request = SubscriptionChangeRequest::new("t", "c");
        assert_eq!(request.lease_seconds(), None);
        assert_eq!(request.with_lease_seconds(3600).lease_seconds(), Some(3600));
    }

    #[test]
    fn test_mode_wire_values() {
        assert_eq!(Mode::Subscribe.to_string(), "subscribe");
        assert_eq!(Mode::Unsubscribe.as_str(), "unsubscribe");
        assert_eq!(Mode::Unsubscribe.noun(), "unsubscription");
    }

    #[test]
    fn test_request_from_json() {
        let request: SubscriptionChangeRequest = serde_json::from_str(
            r#"{"topic": "https://pub.example/feed", "callback": "https://sub.example/cb"}"#,
        )
        .unwrap();
        assert_eq!(request.secret(), None);
        assert_eq!(request.lease_seconds(), None);
    }

    #[test]
    fn test_response_text() {
        let response = HubResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), "unknown topic\n");
        assert_eq!(response.text(), Some("unknown topic"));

        let response = HubResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), vec![0xff, 0xfe]);
        assert_eq!(response.text(), None);

        let response = HubResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), "   ");
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_budget_spends_down_to_zero() {
        let budget = RedirectBudget::new(2);
        let budget = budget.spend().unwrap();
        assert_eq!(budget.remaining(), 1);
        assert_eq!(budget.limit(), 2);
        let budget = budget.spend().unwrap();
        assert_eq!(budget.remaining(), 0);
        assert!(budget.spend().is_none());
        assert!(!budget.is_disabled());
    }

    #[test]
    fn test_disabled_budget() {
        let budget = RedirectBudget::disabled();
        assert!(budget.is_disabled());
        assert!(budget.spend().is_none());
    }

    #[test]
    fn test_auth_debug_hides_credentials() {
        let auth = AuthConfig::Basic {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", auth);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }
}
