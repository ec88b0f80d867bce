//! Transport abstraction and the reqwest-backed implementation.

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::{OutboundRequest, Response, RestError, Result, TransportConfig};

/// A reusable HTTP client bound to a base URL.
///
/// Operations take the transport by `&mut` to normalize its default headers
/// and by `&` to send. `send` must not touch the default headers: the
/// request already carries its own header snapshot.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Base URL relative paths are resolved against.
    fn base_url(&self) -> &Url;

    /// Headers copied into every outbound request.
    fn default_headers(&self) -> &HeaderMap;

    /// Mutable access to the default headers.
    fn default_headers_mut(&mut self) -> &mut HeaderMap;

    /// Issue a request and resolve once the full response body is read.
    async fn send(&self, request: OutboundRequest) -> Result<Response>;
}

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
}

impl ReqwestTransport {
    /// Create a transport from configuration.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(redirect)
            .build()?;

        let mut transport = Self::from_client(inner, &config.base_url)?;
        for (name, value) in &config.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| RestError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| RestError::InvalidHeader(format!("{name}: {e}")))?;
            transport.default_headers.append(name, value);
        }

        Ok(transport)
    }

    /// Wrap an externally built client.
    pub fn from_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| RestError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            inner: client,
            base_url,
            default_headers: HeaderMap::new(),
        })
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    fn default_headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.default_headers
    }

    async fn send(&self, request: OutboundRequest) -> Result<Response> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        Response::from_reqwest(response).await
    }
}
