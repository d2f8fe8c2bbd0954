//! Request logging middleware.
//!
//! Tags every request with an `x-request-id` (echoed from the client when
//! present, otherwise a fresh UUIDv7) and logs start and completion under the
//! `api` target. Health checks and static assets log at debug level.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Paths that are polled often enough to drown the log at info level.
const QUIET_PREFIXES: &[&str] = &["/api/v1/health", "/assets", "/favicon"];

fn is_quiet(path: &str) -> bool {
    QUIET_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let quiet = is_quiet(&path);

        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty() && v.len() <= 128)
            .map(String::from)
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        if quiet {
            debug!(target: "api", request_id = %request_id, method = %method, path = %path, "→ Request started");
        } else {
            let remote_addr = req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string();
            info!(
                target: "api",
                request_id = %request_id,
                method = %method,
                path = %path,
                query = %req.query_string(),
                remote_addr = %remote_addr,
                "→ Request started"
            );
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let duration_ms = start.elapsed().as_millis() as u64;
            let status = res.status();

            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            if status.is_server_error() {
                error!(target: "api", request_id = %request_id, method = %method, path = %path, status = status.as_u16(), duration_ms, "← Server error");
            } else if status.is_client_error() {
                warn!(target: "api", request_id = %request_id, method = %method, path = %path, status = status.as_u16(), duration_ms, "← Client error");
            } else if quiet {
                debug!(target: "api", request_id = %request_id, path = %path, status = status.as_u16(), duration_ms, "← Request completed");
            } else {
                info!(target: "api", request_id = %request_id, method = %method, path = %path, status = status.as_u16(), duration_ms, "← Request completed");
            }

            Ok(res)
        })
    }
}
