//! REST client facade.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::executor::{self, ResponseFuture};
use crate::format::{Json, Xml};
use crate::sink::{BoxedLogSink, LogSink};
use crate::{ReqwestTransport, Result, Transport, TransportConfig};

/// Owns a [`Transport`] and an optional logging sink, and exposes every
/// executor operation as a method.
pub struct RestClient<X: Transport = ReqwestTransport> {
    transport: X,
    sink: Option<BoxedLogSink>,
}

impl RestClient<ReqwestTransport> {
    /// Create a client over a reqwest transport built from `config`.
    pub fn from_config(config: TransportConfig) -> Result<Self> {
        Ok(Self::new(ReqwestTransport::new(config)?))
    }
}

impl<X: Transport> RestClient<X> {
    /// Create a client over `transport` with no logging sink.
    pub fn new(transport: X) -> Self {
        Self {
            transport,
            sink: None,
        }
    }

    /// Install a logging sink receiving formatted request/response entries.
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: Fn(&str) + Send + Sync + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Get the transport.
    pub fn transport(&self) -> &X {
        &self.transport
    }

    /// Get mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut X {
        &mut self.transport
    }

    /// Consume the client and return the transport.
    pub fn into_transport(self) -> X {
        self.transport
    }

    fn sink(&self) -> LogSink<'_> {
        self.sink.as_deref()
    }

    /// GET a JSON document, falling back to `T::default()` when the body
    /// does not parse.
    pub async fn get<T>(&mut self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let sink = self.sink.as_deref();
        executor::get(&mut self.transport, Json, path, sink).await
    }

    /// GET an XML document, falling back to `T::default()` when the body
    /// does not parse.
    pub async fn get_xml<T>(&mut self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let sink = self.sink.as_deref();
        executor::get(&mut self.transport, Xml, path, sink).await
    }

    /// GET the raw body of a JSON resource.
    pub async fn get_text(&mut self, path: &str) -> Result<String> {
        let sink = self.sink.as_deref();
        executor::get_text(&mut self.transport, Json, path, sink).await
    }

    /// GET the raw body of an XML resource.
    pub async fn get_xml_text(&mut self, path: &str) -> Result<String> {
        let sink = self.sink.as_deref();
        executor::get_text(&mut self.transport, Xml, path, sink).await
    }

    /// POST a JSON payload and parse the JSON response.
    pub async fn post<P, R>(&mut self, path: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let sink = self.sink.as_deref();
        executor::post(&mut self.transport, path, payload, sink).await
    }

    /// PUT a JSON payload and parse the JSON response.
    pub async fn put<P, R>(&mut self, path: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let sink = self.sink.as_deref();
        executor::put(&mut self.transport, path, payload, sink).await
    }

    /// DELETE a resource.
    pub async fn delete(&mut self, path: &str) -> Result<()> {
        let sink = self.sink.as_deref();
        executor::delete(&mut self.transport, path, sink).await
    }

    /// Start a GET without awaiting it or checking its status.
    pub fn get_async(&mut self, path: &str) -> Result<ResponseFuture<'_>> {
        let sink = self.sink.as_deref();
        executor::get_async(&mut self.transport, path, sink)
    }

    /// Start a JSON POST without awaiting it or checking its status.
    pub fn post_without_status_check<P>(
        &mut self,
        path: &str,
        payload: &P,
    ) -> Result<ResponseFuture<'_>>
    where
        P: Serialize + ?Sized,
    {
        let sink = self.sink.as_deref();
        executor::post_without_status_check(&mut self.transport, path, payload, sink)
    }
}

impl<X: Transport + std::fmt::Debug> std::fmt::Debug for RestClient<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("transport", &self.transport)
            .field("sink", &self.sink().is_some())
            .finish()
    }
}
