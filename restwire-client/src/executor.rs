//! Call executor.
//!
//! Every operation runs the same pipeline: normalize the transport's default
//! headers, log the outbound request, send and await the response, gate on a
//! 2xx status, log the response, then turn the body into the caller's type.
//! The functions differ only in how the body is encoded and decoded and in
//! what happens when decoding fails:
//!
//! | operation | Accept | response body |
//! |---|---|---|
//! | [`get`] | `F` | parsed as `T`, `T::default()` when malformed |
//! | [`get_text`] | `F` | raw text |
//! | [`submit`] / [`post`] / [`put`] | JSON | parsed as `R`, errors propagate |
//! | [`delete`] | unchanged | discarded after logging |
//! | [`get_async`] / [`post_without_status_check`] | unchanged | not awaited |

use bytes::Bytes;
use futures::future::BoxFuture;
use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::format::{Format, Json};
use crate::headers::{ensure_user_agent, set_accept};
use crate::response::decode_text;
use crate::sink::{LogSink, log_request, log_response};
use crate::{OutboundRequest, Response, RestError, Result, Transport};

/// A response future handed back without being awaited.
pub type ResponseFuture<'a> = BoxFuture<'a, Result<Response>>;

/// Verb used by [`submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl WriteMethod {
    /// The matching HTTP method.
    pub fn as_method(self) -> Method {
        match self {
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
        }
    }
}

impl TryFrom<Method> for WriteMethod {
    type Error = RestError;

    fn try_from(method: Method) -> Result<Self> {
        match method {
            Method::POST => Ok(Self::Post),
            Method::PUT => Ok(Self::Put),
            other => Err(RestError::UnsupportedMethod(other)),
        }
    }
}

/// GET `path` and parse the body as `T`.
///
/// A 2xx response whose body does not parse yields `T::default()`.
pub async fn get<X, F, T>(
    transport: &mut X,
    format: F,
    path: &str,
    sink: LogSink<'_>,
) -> Result<T>
where
    X: Transport + ?Sized,
    F: Format,
    T: DeserializeOwned + Default,
{
    let (status, headers, body) = fetch(transport, format, path, sink).await?;

    // Undecodable bytes fall through to a parse failure.
    let text = String::from_utf8_lossy(&body);
    if sink.is_some() {
        log_response(sink, status, &headers, &F::pretty(&text));
    }

    match F::parse(&text) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::debug!(path, error = %e, "Falling back to default value");
            Ok(T::default())
        }
    }
}

/// GET `path` and return the raw body text.
pub async fn get_text<X, F>(
    transport: &mut X,
    format: F,
    path: &str,
    sink: LogSink<'_>,
) -> Result<String>
where
    X: Transport + ?Sized,
    F: Format,
{
    let (status, headers, body) = fetch(transport, format, path, sink).await?;

    let text = decode_text(body)?;
    if sink.is_some() {
        log_response(sink, status, &headers, &F::pretty(&text));
    }

    Ok(text)
}

/// Send a GET negotiated for `F` and return the parts of a 2xx response.
async fn fetch<X, F>(
    transport: &mut X,
    _format: F,
    path: &str,
    sink: LogSink<'_>,
) -> Result<(StatusCode, HeaderMap, Bytes)>
where
    X: Transport + ?Sized,
    F: Format,
{
    ensure_user_agent(transport.default_headers_mut());
    set_accept(transport.default_headers_mut(), F::MEDIA_TYPE);

    let request = prepare(&*transport, Method::GET, path)?;
    log_request(sink, request.method(), request.url(), request.headers(), None);

    let response = transport.send(request).await?;
    Ok(response.error_for_status()?.into_parts())
}

/// POST `payload` as JSON to `path` and parse the response as `R`.
pub async fn post<X, P, R>(
    transport: &mut X,
    path: &str,
    payload: &P,
    sink: LogSink<'_>,
) -> Result<R>
where
    X: Transport + ?Sized,
    P: Serialize + ?Sized,
    R: DeserializeOwned,
{
    submit(transport, WriteMethod::Post, path, payload, sink).await
}

/// PUT `payload` as JSON to `path` and parse the response as `R`.
pub async fn put<X, P, R>(
    transport: &mut X,
    path: &str,
    payload: &P,
    sink: LogSink<'_>,
) -> Result<R>
where
    X: Transport + ?Sized,
    P: Serialize + ?Sized,
    R: DeserializeOwned,
{
    submit(transport, WriteMethod::Put, path, payload, sink).await
}

/// Send `payload` as JSON with `method` and parse the response as `R`.
///
/// Unlike [`get`], a malformed response body is an error.
pub async fn submit<X, P, R>(
    transport: &mut X,
    method: WriteMethod,
    path: &str,
    payload: &P,
    sink: LogSink<'_>,
) -> Result<R>
where
    X: Transport + ?Sized,
    P: Serialize + ?Sized,
    R: DeserializeOwned,
{
    ensure_user_agent(transport.default_headers_mut());
    set_accept(transport.default_headers_mut(), Json::MEDIA_TYPE);

    let request = prepare_with_payload(&*transport, method.as_method(), path, payload, sink)?;

    let (status, headers, text) = read_success(transport.send(request).await?)?;
    if sink.is_some() {
        log_response(sink, status, &headers, &Json::pretty(&text));
    }

    Json::parse(&text)
}

/// DELETE `path`.
pub async fn delete<X>(transport: &mut X, path: &str, sink: LogSink<'_>) -> Result<()>
where
    X: Transport + ?Sized,
{
    ensure_user_agent(transport.default_headers_mut());

    let request = prepare(&*transport, Method::DELETE, path)?;
    log_request(sink, request.method(), request.url(), request.headers(), None);

    let (status, headers, text) = read_success(transport.send(request).await?)?;
    log_response(sink, status, &headers, &text);

    Ok(())
}

/// Start a GET on `path` without awaiting it or checking its status.
pub fn get_async<'a, X>(
    transport: &'a mut X,
    path: &str,
    sink: LogSink<'_>,
) -> Result<ResponseFuture<'a>>
where
    X: Transport + ?Sized,
{
    ensure_user_agent(transport.default_headers_mut());
    let transport: &'a X = transport;

    let request = prepare(transport, Method::GET, path)?;
    log_request(sink, request.method(), request.url(), request.headers(), None);

    Ok(transport.send(request))
}

/// Start a JSON POST on `path` without awaiting it or checking its status.
pub fn post_without_status_check<'a, X, P>(
    transport: &'a mut X,
    path: &str,
    payload: &P,
    sink: LogSink<'_>,
) -> Result<ResponseFuture<'a>>
where
    X: Transport + ?Sized,
    P: Serialize + ?Sized,
{
    ensure_user_agent(transport.default_headers_mut());
    let transport: &'a X = transport;

    let request = prepare_with_payload(transport, Method::POST, path, payload, sink)?;

    Ok(transport.send(request))
}

fn prepare<X>(transport: &X, method: Method, path: &str) -> Result<OutboundRequest>
where
    X: Transport + ?Sized,
{
    OutboundRequest::new(
        method,
        transport.base_url(),
        path,
        transport.default_headers().clone(),
    )
}

/// Build a JSON request and log it with the indented payload.
fn prepare_with_payload<X, P>(
    transport: &X,
    method: Method,
    path: &str,
    payload: &P,
    sink: LogSink<'_>,
) -> Result<OutboundRequest>
where
    X: Transport + ?Sized,
    P: Serialize + ?Sized,
{
    let body = Json::serialize(payload)?;
    let request = prepare(transport, method, path)?.with_body(Json::MEDIA_TYPE, body);

    let display = match sink {
        Some(_) => Some(Json::serialize_pretty(payload)?),
        None => None,
    };
    log_request(
        sink,
        request.method(),
        request.url(),
        request.headers(),
        display.as_deref(),
    );

    Ok(request)
}

/// Gate on a 2xx status, then decode the body as UTF-8.
fn read_success(response: Response) -> Result<(StatusCode, HeaderMap, String)> {
    let (status, headers, body) = response.error_for_status()?.into_parts();
    Ok((status, headers, decode_text(body)?))
}
