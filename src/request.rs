//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::header::HOST;
use http::{HeaderMap, Method, Uri};

/// An incoming HTTP request with its body fully buffered.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn new(method: Method, uri: &str, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            uri: uri.parse().unwrap(),
            headers: HeaderMap::new(),
            body: body.into(),
            params: HashMap::new(),
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Header lookup. Values that are not visible ASCII are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The host the client addressed: the `Host` header for HTTP/1.1, the
    /// URI authority for HTTP/2.
    pub fn host(&self) -> Option<&str> {
        self.headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| self.uri.authority().map(|a| a.as_str()))
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/stuff/{id}`, `req.param("id")` on `/stuff/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
