//! HTTP transport to a single hub.
//!
//! A [`HubTransport`] is bound to one hub URL and carries the client's credentials.
//! Following a redirect means creating a fresh transport for the new hub with
//! [`HubTransport::redirect`]; the pooled `reqwest` client underneath is shared.

use crate::client::ClientConfig;
use crate::error::{Result, WebSubError};
use crate::protocol::constants::media_types;
use crate::types::{AuthConfig, HubResponse};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

/// Transport bound to one hub.
#[derive(Debug, Clone)]
pub struct HubTransport {
    client: reqwest::Client,
    hub: Url,
    auth: Option<AuthConfig>,
}

impl HubTransport {
    /// Bind `client` to `hub`, presenting `auth` on every request.
    pub fn new(client: reqwest::Client, hub: Url, auth: Option<AuthConfig>) -> Self {
        HubTransport { client, hub, auth }
    }

    /// Hub this transport sends to.
    pub fn hub(&self) -> &Url {
        &self.hub
    }

    /// Transport for `hub` with the same client and credentials.
    pub fn redirect(&self, hub: Url) -> Self {
        HubTransport::new(self.client.clone(), hub, self.auth.clone())
    }

    /// POST a form-encoded `body` to the hub and read the full response.
    ///
    /// A response body that cannot be read is reported as empty; only failures of
    /// the exchange itself are errors.
    pub async fn send(&self, body: String) -> std::result::Result<HubResponse, reqwest::Error> {
        let request = self
            .client
            .post(self.hub.clone())
            .header(CONTENT_TYPE, media_types::FORM_URLENCODED)
            .body(body);

        let response = with_auth(request, self.auth.as_ref()).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Could not read response body from {}: {}", self.hub, e);
                Bytes::new()
            }
        };

        Ok(HubResponse {
            status,
            headers,
            body,
        })
    }
}

/// Attach credentials to a request.
pub(crate) fn with_auth(
    request: reqwest::RequestBuilder,
    auth: Option<&AuthConfig>,
) -> reqwest::RequestBuilder {
    match auth {
        Some(AuthConfig::Bearer { token }) => request.bearer_auth(token),
        Some(AuthConfig::Basic { username, password }) => {
            request.basic_auth(username, Some(password))
        }
        None => request,
    }
}

/// Build the pooled HTTP client described by `config`.
pub(crate) fn build_http_client(
    config: &ClientConfig,
    redirect: reqwest::redirect::Policy,
) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(config.max_idle_connections as usize)
        .user_agent(config.user_agent.as_str())
        .redirect(redirect);

    if !config.proxy_url.is_empty() {
        let proxy = reqwest::Proxy::all(&config.proxy_url)
            .map_err(|e| WebSubError::ClientBuild(format!("invalid proxy: {}", e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| WebSubError::ClientBuild(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_keeps_credentials() {
        let client = build_http_client(&ClientConfig::default(), reqwest::redirect::Policy::none()).unwrap();
        let auth = AuthConfig::Bearer {
            token: "abc".to_string(),
        };
        let transport = HubTransport::new(
            client,
            Url::parse("https://hub.example/").unwrap(),
            Some(auth.clone()),
        );

        let next = transport.redirect(Url::parse("https://redirected.example/hub").unwrap());
        assert_eq!(next.hub().as_str(), "https://redirected.example/hub");
        assert_eq!(next.auth, Some(auth));
    }

    #[test]
    fn test_invalid_proxy_fails_build() {
        let config = ClientConfig {
            proxy_url: "http://[::1".to_string(),
            ..Default::default()
        };
        let result = build_http_client(&config, reqwest::redirect::Policy::none());
        assert!(matches!(result, Err(WebSubError::ClientBuild(_))));
    }
}
