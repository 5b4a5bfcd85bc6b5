use poem::http::HeaderValue;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that tags every request with an id and logs its outcome
///
/// An incoming `x-request-id` header is honored; otherwise a fresh UUID is
/// generated. The id is echoed on the response so callers can correlate
/// log lines with their requests.
pub struct RequestId;

impl<E: Endpoint> Middleware<E> for RequestId {
    type Output = RequestIdEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        RequestIdEndpoint { inner: ep }
    }
}

pub struct RequestIdEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for RequestIdEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let rid = req
            .header(REQUEST_ID_HEADER)
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let mut resp = match self.inner.call(req).await {
            Ok(out) => out.into_response(),
            Err(err) => err.into_response(),
        };

        if let Ok(value) = HeaderValue::from_str(&rid) {
            resp.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        tracing::info!(
            rid = %rid,
            method = %method,
            path = %path,
            status = resp.status().as_u16(),
            "request completed"
        );

        Ok(resp)
    }
}
