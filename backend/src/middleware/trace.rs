//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each request runs inside [`TraceId::scope`] and a `request` span carrying
//! the method, path and trace id. The id is echoed in the `trace-id` response
//! header and the completion is logged with status and latency.

use std::future::Future;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware.
///
/// Handlers and domain errors read the id via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use catalog::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn traced<Fut, B>(
    trace_id: TraceId,
    fut: Fut,
) -> impl Future<Output = Result<ServiceResponse<B>, Error>>
where
    Fut: Future<Output = Result<ServiceResponse<B>, Error>>,
{
    let started = Instant::now();
    async move {
        let mut res = fut.await?;
        match HeaderValue::from_str(&trace_id.to_string()) {
            Ok(value) => {
                res.response_mut()
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            Err(error) => {
                error!(%error, "failed to encode trace identifier header");
            }
        }
        info!(
            status = res.status().as_u16(),
            latency_ms = started.elapsed().as_millis(),
            "request completed"
        );
        Ok(res)
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let span = info_span!(
            "request",
            method = %req.method(),
            path = %req.path(),
            trace_id = %trace_id,
        );
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, traced(trace_id, fut)).instrument(span))
    }
}
