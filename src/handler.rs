//! Handler trait and type erasure.
//!
//! The router holds handlers of different concrete types in one
//! `HashMap<Method, Tree>`, so each handler is boxed behind
//! `dyn ErasedHandler<S>`:
//!
//! ```text
//! async fn get_stuff(req: Request, state: AppState) -> Response { … }
//!        ↓ router.get("/stuff/{id}", get_stuff)
//! get_stuff.into_boxed_handler()                   ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(get_stuff))                   ← stored as BoxedHandler<S>
//!        ↓
//! handler.call(req, state.clone())                 ← one vtable dispatch
//! ```
//!
//! The state is cloned once per request, so it should be a handle (an `Arc`
//! or a struct of `Arc`s), never the data itself.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` because it appears in the return type of
/// [`Handler::into_boxed_handler`].
#[doc(hidden)]
pub trait ErasedHandler<S> {
    fn call(&self, req: Request, state: S) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler<S> = Arc<dyn ErasedHandler<S> + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Never implemented by hand. Any function with the shape
///
/// ```text
/// async fn name(req: Request, state: S) -> impl IntoResponse
/// ```
///
/// satisfies it through the blanket impl below. The trait is sealed.
pub trait Handler<S>: private::Sealed<S> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler<S>;
}

mod private {
    pub trait Sealed<S> {}
}

impl<F, Fut, R, S> private::Sealed<S> for F
where
    F: Fn(Request, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R, S> Handler<S> for F
where
    F: Fn(Request, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler<S> {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R, S> ErasedHandler<S> for FnHandler<F>
where
    F: Fn(Request, S) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, state: S) -> BoxFuture {
        let fut = (self.0)(req, state);
        Box::pin(async move { fut.await.into_response() })
    }
}
