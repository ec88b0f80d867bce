//! Outbound request description.

use http::{HeaderMap, HeaderValue, Method, header};
use url::Url;

use crate::{RestError, Result};

/// An HTTP request ready to be handed to a [`Transport`](crate::Transport).
///
/// Built fresh for every call from the transport's base URL and a snapshot
/// of its default headers. It cannot be changed once issued.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl OutboundRequest {
    /// Create a request for `path` resolved against `base`.
    ///
    /// `path` follows URL reference resolution: `items` appends to a base
    /// ending in `/`, `/items` replaces the base path.
    pub fn new(method: Method, base: &Url, path: &str, headers: HeaderMap) -> Result<Self> {
        let url = base
            .join(path)
            .map_err(|e| RestError::InvalidUrl(format!("{path}: {e}")))?;

        Ok(Self {
            method,
            url,
            headers,
            body: None,
        })
    }

    /// Attach a text body with its content type.
    pub fn with_body(mut self, content_type: &'static str, body: String) -> Self {
        self.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.body = Some(body);
        self
    }

    /// Get the request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the absolute request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the request body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Split the request into its parts.
    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<String>) {
        (self.method, self.url, self.headers, self.body)
    }
}
