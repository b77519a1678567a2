#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # WebSub subscriber client
//!
//! This crate implements the subscriber side of [W3C WebSub] (formerly PubSubHubbub):
//! asking a hub to start or stop delivering a topic's updates to a callback URL.
//!
//! ## Overview
//!
//! A subscription change request is settled in a short chain of exchanges:
//!
//! 1. **Build** - `hub.mode`, `hub.topic`, `hub.callback` and, for subscriptions,
//!    `hub.secret` / `hub.lease_seconds` are form-encoded into a POST body
//! 2. **Send** - the body is POSTed to the hub
//! 3. **Classify** - the hub's answer decides the next step:
//!    - `202 Accepted` - settled; the hub will verify intent asynchronously
//!    - other `2xx` - settled, with a warning
//!    - `307` / `308` - re-send to `Location`, if the redirect budget allows
//!    - anything else - failed, with the hub's explanation when it gave one
//!
//! The redirect budget is a per-call value, so at most `max_count + 1` exchanges
//! happen for one call and concurrent calls never interfere.
//!
//! ## Usage
//!
//! ```ignore
//! use websub_client::{SubscriberClient, SubscriptionChangeRequest};
//! use websub_client::client::{ClientConfig, FollowRedirects};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig {
//!         follow_redirects: Some(FollowRedirects { enabled: true, max_count: 3 }),
//!         ..Default::default()
//!     };
//!     let client = SubscriberClient::new("https://hub.example/", config)?;
//!
//!     let request = SubscriptionChangeRequest::new(
//!         "https://publisher.example/feed",
//!         "https://subscriber.example/callback",
//!     )
//!     .with_secret("s3cr3t");
//!
//!     let accepted = client.subscribe(&request).await?;
//!     println!("{} accepted subscription to {}", accepted.hub, accepted.topic);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Requests, responses, modes, credentials and the redirect budget
//! - **[error]** - Error types and result handling
//! - **[client]** - Subscriber client, transport, redirect following and discovery
//! - **[protocol]** - Request bodies, response classification and `Link` parsing
//!
//! [W3C WebSub]: https://www.w3.org/TR/websub/

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{ClientConfig, FollowRedirects, SubscriberClient};
pub use error::{InitiationFailure, Result, WebSubError};
pub use types::{
    AuthConfig, HubResponse, Mode, RedirectBudget, SubscriptionChangeRequest,
    SubscriptionChangeResponse,
};
