//! WebSub subscriber client.
//!
//! # Examples
//!
//! ## Subscribing
//!
//! ```ignore
//! use websub_client::{SubscriberClient, SubscriptionChangeRequest};
//! use websub_client::client::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SubscriberClient::new("https://hub.example/", ClientConfig::default())?;
//!     let request = SubscriptionChangeRequest::new(
//!         "https://publisher.example/feed",
//!         "https://subscriber.example/callback",
//!     )
//!     .with_lease_seconds(86_400);
//!
//!     let accepted = client.subscribe(&request).await?;
//!     println!("Accepted by {}", accepted.hub);
//!     Ok(())
//! }
//! ```
//!
//! ## Following redirects
//!
//! ```ignore
//! use websub_client::client::{ClientConfig, FollowRedirects};
//!
//! let config = ClientConfig {
//!     follow_redirects: Some(FollowRedirects { enabled: true, max_count: 2 }),
//!     ..Default::default()
//! };
//! let client = SubscriberClient::new("https://hub.example/", config)?;
//! let accepted = client.unsubscribe(&request).await?;
//! // `accepted.hub` is the hub that finally accepted the request
//! ```

use crate::client::discovery::{discover_with, redirect_policy, DiscoveredResource};
use crate::client::redirect::change_subscription;
use crate::client::transport::{build_http_client, HubTransport};
use crate::client::ClientConfig;
use crate::error::{Result, WebSubError};
use crate::protocol::{CallbackEncoder, FormUrlEncoder};
use crate::types::{Mode, RedirectBudget, SubscriptionChangeRequest, SubscriptionChangeResponse};
use std::sync::Arc;
use url::Url;

/// Client that sends subscription change requests to one hub.
///
/// The client holds only immutable configuration, so one instance can serve
/// concurrent calls. Cloning is cheap.
#[derive(Clone)]
pub struct SubscriberClient {
    hub: Url,
    http: reqwest::Client,
    discovery_http: reqwest::Client,
    config: Arc<ClientConfig>,
    encoder: Arc<dyn CallbackEncoder>,
}

impl SubscriberClient {
    /// Create a client for the hub at `url`.
    ///
    /// # Errors
    ///
    /// Fails with [`WebSubError::InvalidUrl`] when `url` is not an absolute HTTP(S) URL
    /// and with [`WebSubError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(url: &str, config: ClientConfig) -> Result<Self> {
        let hub = parse_hub_url(url)?;

        // Hub redirects are classified and followed by hand.
        let http = build_http_client(&config, reqwest::redirect::Policy::none())?;
        let discovery_http = build_http_client(&config, redirect_policy(&config))?;

        Ok(SubscriberClient {
            hub,
            http,
            discovery_http,
            config: Arc::new(config),
            encoder: Arc::new(FormUrlEncoder),
        })
    }

    /// Replace the encoder used for the `hub.callback` value.
    pub fn with_encoder(mut self, encoder: impl CallbackEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    /// Ask the hub to subscribe `request.callback` to `request.topic`.
    ///
    /// # Errors
    ///
    /// Returns [`WebSubError::SubscriptionInitiationFailed`] when the exchange fails,
    /// the hub rejects the request, or a redirect cannot be followed.
    pub async fn subscribe(&self, request: &SubscriptionChangeRequest) -> Result<SubscriptionChangeResponse> {
        self.change(Mode::Subscribe, request).await
    }

    /// Ask the hub to unsubscribe `request.callback` from `request.topic`.
    ///
    /// Secret and lease are never sent, whatever `request` carries.
    ///
    /// # Errors
    ///
    /// Same as [`subscribe`](Self::subscribe).
    pub async fn unsubscribe(&self, request: &SubscriptionChangeRequest) -> Result<SubscriptionChangeResponse> {
        self.change(Mode::Unsubscribe, request).await
    }

    /// Discover the hubs and canonical topic URL advertised by a resource.
    pub async fn discover(&self, resource_url: &str) -> Result<DiscoveredResource> {
        discover_with(&self.discovery_http, resource_url, self.config.auth.as_ref()).await
    }

    async fn change(&self, mode: Mode, request: &SubscriptionChangeRequest) -> Result<SubscriptionChangeResponse> {
        let transport = HubTransport::new(self.http.clone(), self.hub.clone(), self.config.auth.clone());
        change_subscription(transport, mode, request, self.encoder.as_ref(), self.redirect_budget()).await
    }

    /// Hub this client sends to first.
    pub fn hub(&self) -> &Url {
        &self.hub
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Redirect budget every call starts with.
    pub fn redirect_budget(&self) -> RedirectBudget {
        self.config.redirect_budget()
    }
}

impl std::fmt::Debug for SubscriberClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberClient")
            .field("hub", &self.hub.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn parse_hub_url(url: &str) -> Result<Url> {
    let hub = Url::parse(url).map_err(|e| WebSubError::InvalidUrl(format!("{}: {}", url, e)))?;
    match hub.scheme() {
        "http" | "https" => Ok(hub),
        scheme => Err(WebSubError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, scheme
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FollowRedirects;

    #[test]
    fn test_client_creation() {
        let client = SubscriberClient::new("https://hub.example/websub", ClientConfig::default()).unwrap();
        assert_eq!(client.hub().as_str(), "https://hub.example/websub");
        assert!(client.redirect_budget().is_disabled());
    }

    #[test]
    fn test_budget_from_config() {
        let config = ClientConfig {
            follow_redirects: Some(FollowRedirects {
                enabled: true,
                max_count: 4,
            }),
            ..Default::default()
        };
        let client = SubscriberClient::new("http://localhost:8080/hub", config).unwrap();
        assert_eq!(client.redirect_budget().remaining(), 4);
    }

    #[test]
    fn test_malformed_url() {
        let result = SubscriberClient::new("not a url", ClientConfig::default());
        assert!(matches!(result, Err(WebSubError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_scheme() {
        let result = SubscriberClient::new("ftp://hub.example/", ClientConfig::default());
        assert!(matches!(result, Err(WebSubError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SubscriberClient>();
    }
}
