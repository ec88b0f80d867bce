//! # Restwire Client
//!
//! A format-agnostic REST call layer on top of a pooled HTTP transport.
//!
//! ## Features
//!
//! - **Uniform verbs**: GET/POST/PUT/DELETE against a base URL
//! - **Pluggable formats**: JSON and XML adapters chosen per call site
//! - **Header normalization**: the `restwire/<version>` user-agent token is
//!   injected exactly once, however many calls share a transport
//! - **Logging sink**: optional callback receiving each request and response,
//!   with bodies pretty-printed for display only
//! - **Fallback on malformed bodies**: typed GETs return `T::default()` when a
//!   successful response does not parse; writes surface the error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restwire_client::{RestClient, TransportConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Item {
//!     id: u64,
//! }
//!
//! #[derive(Serialize)]
//! struct NewItem<'a> {
//!     name: &'a str,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TransportConfig::builder()
//!         .base_url("https://api.example.com/v1/")
//!         .build();
//!
//!     let mut client = RestClient::from_config(config)?.with_sink(|entry| println!("{entry}"));
//!
//!     let item: Item = client.get("items/1").await?;
//!     let created: Item = client.post("items", &NewItem { name: "widget" }).await?;
//!     client.delete(&format!("items/{}", created.id)).await?;
//!
//!     println!("fetched {}", item.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Transports
//!
//! The executor functions in [`executor`] accept any [`Transport`], so the
//! pipeline can run over an in-memory double or another HTTP stack.

mod client;
mod config;
mod error;
pub mod executor;
mod format;
mod headers;
mod request;
mod response;
mod sink;
mod transport;

pub use client::RestClient;
pub use config::{TransportConfig, TransportConfigBuilder};
pub use error::{RestError, Result};
pub use executor::{ResponseFuture, WriteMethod};
pub use format::{Format, Json, Xml};
pub use headers::{USER_AGENT_TOKEN, ensure_user_agent, set_accept};
pub use request::OutboundRequest;
pub use response::Response;
pub use sink::{
    BoxedLogSink, LogSink, format_request, format_response, log_request, log_response,
};
pub use transport::{ReqwestTransport, Transport};

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use restwire_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::RestClient;
    pub use crate::config::{TransportConfig, TransportConfigBuilder};
    pub use crate::error::{RestError, Result};
    pub use crate::executor::{ResponseFuture, WriteMethod};
    pub use crate::format::{Format, Json, Xml};
    pub use crate::sink::LogSink;
    pub use crate::transport::{ReqwestTransport, Transport};
    pub use http::{HeaderMap, Method, StatusCode, header};
}
