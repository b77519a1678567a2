//! Bounded redirect following.
//!
//! One subscribe or unsubscribe call is a chain of hub exchanges: send, classify,
//! and on a followed redirect send again to the new hub with one redirect fewer in
//! the budget. The chain ends after at most `limit + 1` exchanges.

use crate::client::transport::HubTransport;
use crate::error::{InitiationFailure, Result, WebSubError};
use crate::protocol::{build_body_with, classify, CallbackEncoder, Outcome};
use crate::types::{Mode, RedirectBudget, SubscriptionChangeRequest, SubscriptionChangeResponse};

/// Send `request` through `transport`, following redirects within `budget`.
pub(crate) async fn change_subscription(
    mut transport: HubTransport,
    mode: Mode,
    request: &SubscriptionChangeRequest,
    encoder: &dyn CallbackEncoder,
    mut budget: RedirectBudget,
) -> Result<SubscriptionChangeResponse> {
    loop {
        let hub = transport.hub().to_string();
        let body = build_body_with(mode, request, encoder);

        tracing::debug!("Sending {} request for topic {} to hub {}", mode, request.topic, hub);

        let response = transport.send(body).await.map_err(|e| {
            WebSubError::initiation_failed(mode, hub.as_str(), InitiationFailure::Transport(e.to_string()))
        })?;

        tracing::debug!("Hub {} responded with {}", hub, response.status);

        match classify(transport.hub(), &response, budget) {
            Outcome::Accepted { canonical } => {
                if !canonical {
                    tracing::warn!(
                        "Hub {} responded to {} request with {} instead of 202 Accepted; treating as success",
                        hub,
                        mode,
                        response.status
                    );
                }
                return Ok(SubscriptionChangeResponse {
                    hub,
                    topic: request.topic.clone(),
                    response,
                });
            }
            Outcome::Redirect {
                location,
                budget: next,
            } => {
                tracing::info!(
                    "Hub {} redirected {} request to {} ({} redirect(s) left)",
                    hub,
                    mode,
                    location,
                    next.remaining()
                );
                transport = transport.redirect(location);
                budget = next;
            }
            Outcome::Failed(failure) => {
                return Err(WebSubError::initiation_failed(mode, hub, failure));
            }
        }
    }
}
