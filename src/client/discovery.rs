//! Hub and topic discovery.
//!
//! Fetches a resource and reads the hubs (`rel="hub"`) and canonical topic URL
//! (`rel="self"`) from its `Link` headers. Relative link targets are resolved
//! against the URL the resource was finally served from.
//!
//! # Examples
//!
//! ```ignore
//! use websub_client::client::{discover_hub_and_topic, ClientConfig};
//!
//! let found = discover_hub_and_topic("https://publisher.example/feed", &ClientConfig::default()).await?;
//! let client = SubscriberClient::new(&found.hubs[0], ClientConfig::default())?;
//! ```

use crate::client::transport::{build_http_client, with_auth};
use crate::client::ClientConfig;
use crate::error::{Result, WebSubError};
use crate::protocol::constants::rel;
use crate::protocol::parse_link_header;
use crate::types::AuthConfig;
use http::header::LINK;
use url::Url;

/// Hubs and topic advertised by a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredResource {
    /// Advertised hubs, in header order
    pub hubs: Vec<String>,
    /// Canonical topic URL
    pub topic: String,
}

/// Discover the hubs and topic of `resource_url` with a client built from `config`.
pub async fn discover_hub_and_topic(resource_url: &str, config: &ClientConfig) -> Result<DiscoveredResource> {
    let client = build_http_client(config, redirect_policy(config))?;
    discover_with(&client, resource_url, config.auth.as_ref()).await
}

pub(crate) async fn discover_with(
    client: &reqwest::Client,
    resource_url: &str,
    auth: Option<&AuthConfig>,
) -> Result<DiscoveredResource> {
    let response = with_auth(client.get(resource_url), auth)
        .send()
        .await
        .map_err(|e| WebSubError::Discovery(format!("request to {} failed: {}", resource_url, e)))?;

    if !response.status().is_success() {
        return Err(WebSubError::Discovery(format!(
            "resource {} responded with status {}",
            resource_url,
            response.status()
        )));
    }

    let base = response.url().clone();
    let mut hubs = Vec::new();
    let mut topic = None;

    for value in response.headers().get_all(LINK) {
        let Ok(value) = value.to_str() else {
            tracing::debug!("Skipping non-ASCII Link header from {}", base);
            continue;
        };
        for link in parse_link_header(value)? {
            let target = resolve(&base, &link.target)?;
            if link.has_rel(rel::HUB) {
                hubs.push(target.clone());
            }
            if link.has_rel(rel::SELF) && topic.is_none() {
                topic = Some(target);
            }
        }
    }

    match (hubs.is_empty(), topic) {
        (false, Some(topic)) => {
            tracing::debug!("Discovered topic {} with hubs {:?} at {}", topic, hubs, base);
            Ok(DiscoveredResource { hubs, topic })
        }
        _ => Err(WebSubError::Discovery(format!(
            "hub and/or topic URL not found in Link headers of {}",
            resource_url
        ))),
    }
}

/// Discovery lets reqwest follow ordinary redirects within the configured budget.
pub(crate) fn redirect_policy(config: &ClientConfig) -> reqwest::redirect::Policy {
    let budget = config.redirect_budget();
    if budget.is_disabled() {
        reqwest::redirect::Policy::none()
    } else {
        reqwest::redirect::Policy::limited(budget.limit() as usize)
    }
}

fn resolve(base: &Url, target: &str) -> Result<String> {
    base.join(target)
        .map(String::from)
        .map_err(|e| WebSubError::Discovery(format!("invalid link target '{}': {}", target, e)))
}
