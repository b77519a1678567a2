//! WebSub subscriber wire protocol.
//!
//! Everything here is free of I/O:
//!
//! - [`form`] builds the body of subscribe and unsubscribe requests
//! - [`classify`] decides what a hub's response means
//! - [`link`] parses `Link` headers for discovery
//! - [`constants`] holds parameter names, media types and status codes
//!
//! Based on the [W3C WebSub Recommendation], sections 5.1 (subscriber sends
//! subscription request) and 4 (discovery).
//!
//! [W3C WebSub Recommendation]: https://www.w3.org/TR/websub/

pub mod classify;
pub mod constants;
pub mod form;
pub mod link;

pub use classify::{classify, Outcome};
pub use form::{build_body, build_body_with, CallbackEncoder, EncodeError, FormUrlEncoder};
pub use link::{parse_link_header, Link};
