use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};
use vle_core::{decode_response, Endpoint, SubmissionResult};

#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("invalid API base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Shared client with the request timeout applied.
pub fn default_http_client() -> Result<Client, NetError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(vle_config::REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("vle/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Sends one form submission and reports how it went. Implementations never
/// fail: every problem is folded into [`SubmissionResult`].
#[async_trait::async_trait]
pub trait ApiTransport: Send + Sync {
    async fn submit(
        &self,
        endpoint: &Endpoint,
        body: &Value,
        bearer: Option<&str>,
    ) -> SubmissionResult;
}

/// JSON-over-HTTP transport rooted at the API base URL.
pub struct HttpApiTransport {
    client: Client,
    base: Url,
}

/// Parse the API base so that joining `login` yields `<base>/login` rather
/// than replacing the last path segment.
pub(crate) fn normalize_api_base(base_url: &str) -> Result<Url, NetError> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| NetError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(NetError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "not a hierarchical url".into(),
        });
    }
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

impl HttpApiTransport {
    pub fn new(client: Client, base_url: &str) -> Result<Self, NetError> {
        Ok(Self {
            client,
            base: normalize_api_base(base_url)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url, NetError> {
        self.base
            .join(endpoint.path.trim_start_matches('/'))
            .map_err(|e| NetError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl ApiTransport for HttpApiTransport {
    async fn submit(
        &self,
        endpoint: &Endpoint,
        body: &Value,
        bearer: Option<&str>,
    ) -> SubmissionResult {
        let url = match self.endpoint_url(endpoint) {
            Ok(url) => url,
            Err(e) => return SubmissionResult::unreachable(e.to_string()),
        };

        let mut request = self
            .client
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        debug!(%url, authenticated = bearer.is_some(), "sending form submission");
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, "request failed: {e}");
                return SubmissionResult::unreachable(format!("request to {url} failed: {e}"));
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(%url, %status, "reading response body failed: {e}");
                return SubmissionResult::unreachable(format!("reading response failed: {e}"));
            }
        };

        let result = decode_response(endpoint.acceptance, status.as_u16(), &bytes);
        if let SubmissionResult::Unreachable { message } = &result {
            warn!(%url, %status, "{message}");
        } else {
            debug!(%url, %status, success = result.is_success(), "response decoded");
        }
        result
    }
}
