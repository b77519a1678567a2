//! WebSub wire constants.

/// Form parameter names sent to the hub.
pub mod params {
    /// `subscribe` or `unsubscribe`
    pub const MODE: &str = "hub.mode";
    /// Topic URL
    pub const TOPIC: &str = "hub.topic";
    /// Subscriber callback URL
    pub const CALLBACK: &str = "hub.callback";
    /// Shared secret (subscribe only)
    pub const SECRET: &str = "hub.secret";
    /// Requested lease duration (subscribe only)
    pub const LEASE_SECONDS: &str = "hub.lease_seconds";
}

/// Media types.
pub mod media_types {
    /// Body type of subscription change requests
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
}

/// Link relations used in discovery.
pub mod rel {
    /// Hub advertised by a publisher
    pub const HUB: &str = "hub";
    /// Canonical topic URL
    pub const SELF: &str = "self";
}

/// Status codes with protocol meaning.
pub mod status {
    use http::StatusCode;

    /// Canonical acceptance: the hub will verify intent asynchronously.
    pub const ACCEPTED: StatusCode = StatusCode::ACCEPTED;
    /// Redirects the client follows, preserving method and body.
    pub const FOLLOWED_REDIRECTS: [StatusCode; 2] =
        [StatusCode::TEMPORARY_REDIRECT, StatusCode::PERMANENT_REDIRECT];
}
