//! Per-request identifier, carried through a task-local so services and
//! error bodies can reference it without threading it through every call.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn generate() -> Self {
        Self(format!("req-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

tokio::task_local! {
    static REQUEST_ID: RequestId;
}

/// Returns the id of the request currently being handled, if any.
pub fn current_request_id() -> Option<String> {
    REQUEST_ID
        .try_with(|rid| rid.as_str().to_string())
        .ok()
}

/// Runs `fut` with the given request id visible via [`current_request_id`].
pub async fn scope_request_id<F>(id: RequestId, fut: F) -> F::Output
where
    F: std::future::Future,
{
    REQUEST_ID.scope(id, fut).await
}

/// Middleware: honor an incoming `x-request-id` or mint one, expose it to
/// the handler via the task-local, and echo it on the response.
pub async fn request_id_middleware(req: Request<Body>, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(RequestId::new)
        .unwrap_or_else(RequestId::generate);

    let mut response = scope_request_id(id.clone(), next.run(req)).await;
    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
