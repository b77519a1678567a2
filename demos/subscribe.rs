//! Subscribe a callback to a topic at a hub.
//!
//! Run with: cargo run --example subscribe -- <hub> <topic> <callback> [lease-seconds]
//!
//! Set `WEBSUB_SECRET` to send a shared secret, and `WEBSUB_UNSUBSCRIBE=1` to
//! unsubscribe instead.

use anyhow::{bail, Context};
use websub_client::client::{ClientConfig, FollowRedirects, SubscriberClient};
use websub_client::SubscriptionChangeRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (hub, topic, callback) = match args.as_slice() {
        [hub, topic, callback, ..] => (hub, topic, callback),
        _ => bail!("usage: subscribe <hub> <topic> <callback> [lease-seconds]"),
    };
    let lease_seconds = match args.get(3) {
        Some(lease) => lease.parse().context("lease-seconds must be a non-negative integer")?,
        None => 0,
    };

    let config = ClientConfig {
        follow_redirects: Some(FollowRedirects::default()),
        ..Default::default()
    };
    let client = SubscriberClient::new(hub, config)?;

    let mut request = SubscriptionChangeRequest::new(topic, callback).with_lease_seconds(lease_seconds);
    if let Ok(secret) = std::env::var("WEBSUB_SECRET") {
        request = request.with_secret(secret);
    }

    let accepted = if std::env::var("WEBSUB_UNSUBSCRIBE").is_ok_and(|v| v == "1") {
        client.unsubscribe(&request).await?
    } else {
        client.subscribe(&request).await?
    };

    tracing::info!(
        "Hub {} accepted request for {} with status {}",
        accepted.hub,
        accepted.topic,
        accepted.response.status
    );
    Ok(())
}
