//! WebSub subscriber client.
//!
//! This module sends subscription change requests to a hub and settles them:
//!
//! - **Builds** the form-encoded `subscribe` / `unsubscribe` request
//! - **Classifies** the hub's answer as accepted, redirected or failed
//! - **Follows** `307` / `308` redirects within a per-call budget
//! - **Discovers** hubs and topics from a publisher's `Link` headers
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── subscriber - SubscriberClient façade
//! ├── redirect   - Bounded redirect-follow loop
//! ├── transport  - HTTP exchange with a single hub
//! ├── discovery  - Hub and topic discovery
//! └── config     - Client configuration
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SubscriberClient`] | Sends subscribe and unsubscribe requests |
//! | [`HubTransport`] | HTTP transport bound to one hub |
//! | [`ClientConfig`] | Client configuration options |
//! | [`FollowRedirects`] | Redirect following settings |
//! | [`DiscoveredResource`] | Hubs and topic advertised by a resource |
//!
//! # Examples
//!
//! ```
//! use websub_client::client::{ClientConfig, FollowRedirects, SubscriberClient};
//!
//! let config = ClientConfig {
//!     request_timeout_ms: 10_000,
//!     follow_redirects: Some(FollowRedirects::default()),
//!     ..Default::default()
//! };
//! let client = SubscriberClient::new("https://hub.example/", config).unwrap();
//! assert_eq!(client.redirect_budget().limit(), 5);
//! ```

mod config;
mod discovery;
mod redirect;
mod subscriber;
mod transport;

pub use config::{ClientConfig, FollowRedirects};
pub use discovery::{discover_hub_and_topic, DiscoveredResource};
pub use subscriber::SubscriberClient;
pub use transport::HubTransport;
