//! Hub response classification.
//!
//! Decides what a hub's response means for a subscription change request:
//!
//! | Response | Outcome |
//! |----------|---------|
//! | `307` / `308`, budget left, resolvable `Location` | [`Outcome::Redirect`] |
//! | `307` / `308`, no budget left | [`InitiationFailure::RedirectsDisabled`] or [`InitiationFailure::RedirectLimitExhausted`] |
//! | `307` / `308`, missing or unresolvable `Location` | [`InitiationFailure::MissingLocation`] or [`InitiationFailure::InvalidLocation`] |
//! | any other non-2xx | [`InitiationFailure::Rejected`] with the body, or [`InitiationFailure::Unexplained`] |
//! | `202` | [`Outcome::Accepted`] |
//! | other 2xx | [`Outcome::Accepted`], flagged as non-canonical |
//!
//! Transport failures never reach the classifier; the caller turns them into
//! [`InitiationFailure::Transport`] directly.

use super::constants::status;
use crate::error::InitiationFailure;
use crate::types::{HubResponse, RedirectBudget};
use http::header::LOCATION;
use url::Url;

/// What a hub response means for the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The hub accepted the request.
    Accepted {
        /// `false` when the status was a 2xx other than `202 Accepted`
        canonical: bool,
    },
    /// The request must be re-sent to `location`.
    Redirect {
        /// Next hub URL, resolved against the current hub
        location: Url,
        /// Budget to carry to the next hop
        budget: RedirectBudget,
    },
    /// The request failed.
    Failed(InitiationFailure),
}

/// Classify `response`, received from `hub`, with `budget` redirects left to follow.
pub fn classify(hub: &Url, response: &HubResponse, budget: RedirectBudget) -> Outcome {
    let code = response.status.as_u16();

    if status::FOLLOWED_REDIRECTS.contains(&response.status) {
        let Some(next_budget) = budget.spend() else {
            return Outcome::Failed(if budget.is_disabled() {
                InitiationFailure::RedirectsDisabled { status: code }
            } else {
                InitiationFailure::RedirectLimitExhausted {
                    status: code,
                    limit: budget.limit(),
                }
            });
        };

        let Some(location) = response.header(LOCATION).map(str::trim).filter(|l| !l.is_empty()) else {
            return Outcome::Failed(InitiationFailure::MissingLocation { status: code });
        };

        return match hub.join(location) {
            Ok(location) => Outcome::Redirect {
                location,
                budget: next_budget,
            },
            Err(e) => Outcome::Failed(InitiationFailure::InvalidLocation {
                location: location.to_string(),
                reason: e.to_string(),
            }),
        };
    }

    if !response.status.is_success() {
        return Outcome::Failed(match response.text() {
            Some(body) => InitiationFailure::Rejected {
                status: code,
                body: body.to_string(),
            },
            None => InitiationFailure::Unexplained { status: code },
        });
    }

    Outcome::Accepted {
        canonical: response.status == status::ACCEPTED,
    }
}
