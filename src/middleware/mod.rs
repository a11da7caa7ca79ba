//! Cross-cutting request and response behaviour.
//!
//! The router applies both of these to every request it sees, matched or not:
//!
//! - [`trim_trailing_slash`] before lookup, so `/stuff/` and `/stuff` are the
//!   same route.
//! - [`json_content_type`] after the handler, so every response is labelled
//!   `application/json` without each handler repeating it.

use http::HeaderValue;
use http::header::CONTENT_TYPE;

use crate::response::{APPLICATION_JSON, Response};

/// Strips trailing `/` characters from a request path. The root path stays `/`.
pub fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Sets `Content-Type: application/json`, replacing any value the handler set.
pub fn json_content_type(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    response
}
