//! Correlation id middleware.
//!
//! Every request is tagged with a [`CorrelationId`]: the one the client sent
//! in `X-Correlation-ID` if it parses as a UUID, a fresh v4 otherwise. The id
//! is stored in request extensions, recorded on an `http_request` span that
//! wraps the handler, and echoed back in the response header.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/api/dispatch", post(dispatch))
//!     .layer(correlation_id_layer());
//! ```

use axum::{extract::Request, response::Response};
use http::HeaderValue;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Correlation id attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(pub Uuid);

impl CorrelationId {
    /// Id sent by the client, or a new one.
    #[must_use]
    pub fn from_header(value: Option<&HeaderValue>) -> Self {
        let id = value
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        Self(id)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Layer that tags every request with a [`CorrelationId`].
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Service produced by [`CorrelationIdLayer`].
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = CorrelationId::from_header(req.headers().get(CORRELATION_ID_HEADER));
        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response.headers_mut().insert(CORRELATION_ID_HEADER, value);
            }

            Ok(response)
        })
    }
}

/// Read the [`CorrelationId`] the middleware stored on a request.
pub trait CorrelationIdExt {
    /// The request's correlation id, if the middleware is installed.
    fn correlation_id(&self) -> Option<CorrelationId>;
}

impl<B> CorrelationIdExt for http::Request<B> {
    fn correlation_id(&self) -> Option<CorrelationId> {
        self.extensions().get::<CorrelationId>().copied()
    }
}
