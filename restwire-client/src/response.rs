//! HTTP response wrapper.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use url::Url;

use crate::{RestError, Result};

/// A fully read HTTP response.
///
/// The body is owned by the response and handed out by value, so it is
/// consumed at most once.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    url: Url,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>, url: Url) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            url,
        }
    }

    /// Create a response from a reqwest response, reading the whole body.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes().await?;

        Ok(Self {
            status,
            headers,
            body,
            url,
        })
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Get the response URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Consume the response and return the body as text.
    pub fn into_text(self) -> Result<String> {
        decode_text(self.body)
    }

    /// Consume the response and return status, headers and body.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Turn a non-2xx response into [`RestError::HttpStatus`].
    ///
    /// The raw body is attached as-is; invalid UTF-8 is replaced rather than
    /// reported so the status is never masked.
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(RestError::HttpStatus {
                status: self.status.as_u16(),
                body: String::from_utf8_lossy(&self.body).into_owned(),
            })
        }
    }
}

/// Decode a body as UTF-8 text.
pub(crate) fn decode_text(body: Bytes) -> Result<String> {
    String::from_utf8(body.to_vec()).map_err(|e| RestError::BodyRead(e.to_string()))
}
