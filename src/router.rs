//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Every request passes
//! through [`middleware::trim_trailing_slash`] before lookup and every
//! response through [`middleware::json_content_type`] after it.

use std::collections::HashMap;
use std::sync::Arc;

use http::header::ALLOW;
use http::{HeaderValue, Method, StatusCode};
use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware;
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Built once at startup and handed to [`Server::serve`](crate::Server::serve).
/// `S` is the shared state passed to every handler; it is cloned per request.
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router<()> {
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    /// Routes one request and produces one response.
    pub(crate) async fn handle(&self, mut req: Request) -> Response {
        let path = middleware::trim_trailing_slash(req.path()).to_owned();

        let response = match self.lookup(&req.method, &path) {
            Lookup::Found(handler, params) => {
                req.params = params;
                handler.call(req, self.state.clone()).await
            }
            Lookup::MethodNotAllowed(allowed) => {
                debug!(method = %req.method, %path, "method not allowed");
                method_not_allowed(&allowed)
            }
            Lookup::NotFound => {
                debug!(method = %req.method, %path, "no route");
                Response::status(StatusCode::NOT_FOUND)
            }
        };

        middleware::json_content_type(response)
    }

    fn lookup(&self, method: &Method, path: &str) -> Lookup<S> {
        if let Some(matched) = self.routes.get(method).and_then(|tree| tree.at(path).ok()) {
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(Arc::clone(matched.value), params);
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| m.clone())
            .collect();

        if allowed.is_empty() {
            Lookup::NotFound
        } else {
            allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            Lookup::MethodNotAllowed(allowed)
        }
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let list = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
    match HeaderValue::from_str(&list) {
        Ok(value) => Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(ALLOW, value)
            .no_body(),
        Err(_) => Response::status(StatusCode::METHOD_NOT_ALLOWED),
    }
}
