//! Request/response logging sink.
//!
//! A sink is an optional callback receiving one formatted, multi-line entry
//! per outbound request and per inbound response. Nothing is formatted when
//! no sink is supplied.

use std::fmt::Write;

use http::{HeaderMap, Method, StatusCode};
use url::Url;

/// Optional per-call logging callback.
pub type LogSink<'a> = Option<&'a (dyn Fn(&str) + Send + Sync)>;

/// Owned logging callback, as stored by [`RestClient`](crate::RestClient).
pub type BoxedLogSink = Box<dyn Fn(&str) + Send + Sync>;

/// Log an outbound request.
pub fn log_request(
    sink: LogSink<'_>,
    method: &Method,
    url: &Url,
    headers: &HeaderMap,
    body: Option<&str>,
) {
    tracing::debug!(method = %method, url = %url, "Sending HTTP request");

    if let Some(sink) = sink {
        sink(&format_request(method, url, headers, body));
    }
}

/// Log an inbound response.
pub fn log_response(sink: LogSink<'_>, status: StatusCode, headers: &HeaderMap, body: &str) {
    tracing::debug!(status = %status, "Received HTTP response");

    if let Some(sink) = sink {
        sink(&format_response(status, headers, body));
    }
}

/// Render a request entry.
pub fn format_request(
    method: &Method,
    url: &Url,
    headers: &HeaderMap,
    body: Option<&str>,
) -> String {
    let mut out = format!("Request: {method} {url}\n");
    write_headers(&mut out, headers);
    write_body(&mut out, body.unwrap_or_default());
    out
}

/// Render a response entry.
pub fn format_response(status: StatusCode, headers: &HeaderMap, body: &str) -> String {
    let mut out = format!("Response: {status}\n");
    write_headers(&mut out, headers);
    write_body(&mut out, body);
    out
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    out.push_str("Headers:\n");
    for (name, value) in headers {
        let _ = writeln!(out, "  {}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
}

fn write_body(out: &mut String, body: &str) {
    out.push_str("Body:\n");
    if body.is_empty() {
        out.push_str("<empty>");
    } else {
        out.push_str(body);
    }
}
