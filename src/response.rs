//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] (or anything that converts into one) and
//! return it. The router stamps the content type afterwards.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// An outgoing HTTP response.
///
/// ```rust
/// use http::StatusCode;
/// use stuffd::Response;
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::status(StatusCode::NOT_FOUND);
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

impl Response {
    /// `200 OK` with a JSON body.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::builder().json(body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { status: code, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: HeaderMap::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn headers_mut(&mut self) -> &mut HeaderMap { &mut self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }
}

/// Fluent builder for [`Response`]. Defaults to `200 OK`.
pub struct ResponseBuilder {
    headers: HeaderMap,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Terminate with a JSON body.
    pub fn json(mut self, body: impl Into<Bytes>) -> Response {
        self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Response { body: body.into(), headers: self.headers, status: self.status }
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }
}

/// Conversion into an HTTP [`Response`].
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a bare status from a handler: `return StatusCode::NOT_FOUND`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

/// A serde value rendered as a `200 OK` JSON body.
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => Response::json(bytes),
            Err(e) => {
                error!(error = %e, "failed to serialise response body");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
