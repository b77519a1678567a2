//! Subscription change request bodies.
//!
//! Builds the `application/x-www-form-urlencoded` body POSTed to a hub:
//!
//! ```text
//! hub.mode=<mode>&hub.topic=<topic>&hub.callback=<encoded callback>[&hub.secret=<secret>][&hub.lease_seconds=<n>]
//! ```
//!
//! Only the callback is percent-encoded. `hub.secret` and `hub.lease_seconds` are
//! appended for subscriptions only, and only when the request actually carries them.
//!
//! # Examples
//!
//! ```
//! use websub_client::protocol::build_body;
//! use websub_client::{Mode, SubscriptionChangeRequest};
//!
//! let request = SubscriptionChangeRequest::new(
//!     "https://pub.example/feed",
//!     "https://sub.example/cb?id=1",
//! )
//! .with_lease_seconds(3600);
//!
//! assert_eq!(
//!     build_body(Mode::Subscribe, &request),
//!     "hub.mode=subscribe&hub.topic=https://pub.example/feed\
//!      &hub.callback=https%3A%2F%2Fsub.example%2Fcb%3Fid%3D1&hub.lease_seconds=3600"
//! );
//! ```

use super::constants::params;
use crate::types::{Mode, SubscriptionChangeRequest};
use thiserror::Error;

/// Failure reported by a [`CallbackEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to encode callback: {0}")]
pub struct EncodeError(pub String);

/// Encodes the callback URL for the request body.
pub trait CallbackEncoder: Send + Sync {
    /// Encode `callback` for inclusion as the `hub.callback` value.
    fn encode(&self, callback: &str) -> Result<String, EncodeError>;
}

/// Form URL encoding of the UTF-8 bytes of the callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormUrlEncoder;

impl CallbackEncoder for FormUrlEncoder {
    fn encode(&self, callback: &str) -> Result<String, EncodeError> {
        Ok(url::form_urlencoded::byte_serialize(callback.as_bytes()).collect())
    }
}

/// Build the request body with the default [`FormUrlEncoder`].
pub fn build_body(mode: Mode, request: &SubscriptionChangeRequest) -> String {
    build_body_with(mode, request, &FormUrlEncoder)
}

/// Build the request body, encoding the callback with `encoder`.
///
/// Never fails: when the encoder reports an error the raw callback is sent instead.
pub fn build_body_with(
    mode: Mode,
    request: &SubscriptionChangeRequest,
    encoder: &dyn CallbackEncoder,
) -> String {
    let callback = match encoder.encode(&request.callback) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!(
                "{}; sending unencoded callback {}",
                e,
                request.callback
            );
            request.callback.clone()
        }
    };

    let mut body = format!(
        "{}={}&{}={}&{}={}",
        params::MODE,
        mode,
        params::TOPIC,
        request.topic,
        params::CALLBACK,
        callback
    );

    if mode == Mode::Subscribe {
        if let Some(secret) = request.secret() {
            body.push_str(&format!("&{}={}", params::SECRET, secret));
        }
        if let Some(lease) = request.lease_seconds() {
            body.push_str(&format!("&{}={}", params::LEASE_SECONDS, lease));
        }
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingEncoder;

    impl CallbackEncoder for FailingEncoder {
        fn encode(&self, _callback: &str) -> Result<String, EncodeError> {
            Err(EncodeError("unsupported charset".to_string()))
        }
    }

    fn request() -> SubscriptionChangeRequest {
        SubscriptionChangeRequest::new("https://pub.example/feed", "https://sub.example/cb")
    }

    #[test]
    fn test_parameter_order() {
        let body = build_body(Mode::Subscribe, &request());
        assert_eq!(
            body,
            "hub.mode=subscribe&hub.topic=https://pub.example/feed\
             &hub.callback=https%3A%2F%2Fsub.example%2Fcb"
        );
    }

    #[test]
    fn test_blank_secret_omitted() {
        for secret in ["", " ", "\t\n"] {
            let body = build_body(Mode::Subscribe, &request().with_secret(secret));
            assert!(!body.contains("hub.secret"), "secret {:?} leaked: {}", secret, body);
        }
    }

    #[test]
    fn test_secret_and_lease_appended_in_order() {
        let body = build_body(
            Mode::Subscribe,
            &request().with_secret("s3cr3t").with_lease_seconds(86_400),
        );
        assert!(body.ends_with("&hub.secret=s3cr3t&hub.lease_seconds=86400"));
    }

    #[test]
    fn test_zero_lease_omitted() {
        let body = build_body(Mode::Subscribe, &request().with_secret("k"));
        assert!(!body.contains("hub.lease_seconds"));
    }

    #[test]
    fn test_unsubscribe_never_sends_secret_or_lease() {
        let body = build_body(
            Mode::Unsubscribe,
            &request().with_secret("s3cr3t").with_lease_seconds(60),
        );
        assert_eq!(
            body,
            "hub.mode=unsubscribe&hub.topic=https://pub.example/feed\
             &hub.callback=https%3A%2F%2Fsub.example%2Fcb"
        );
    }

    #[test]
    fn test_encoder_failure_falls_back_to_raw_callback() {
        let body = build_body_with(Mode::Subscribe, &request(), &FailingEncoder);
        assert!(body.ends_with("&hub.callback=https://sub.example/cb"));
    }
}
