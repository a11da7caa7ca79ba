//! Route table and shared handler state.

use std::sync::Arc;

use crate::health;
use crate::router::Router;
use crate::stuff::{StuffStore, handlers};

/// Handed to every handler. Cloning only bumps the store's reference count.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StuffStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn StuffStore>) -> Self {
        Self { store }
    }
}

/// Builds the service router over `store`.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/test` | [`health::status`] |
/// | GET | `/stuff` | [`handlers::list`] |
/// | POST | `/stuff` | [`handlers::create`] |
/// | GET | `/stuff/{id}` | [`handlers::get`] |
/// | DELETE | `/stuff/{id}` | [`handlers::delete`] |
pub fn build_router(store: Arc<dyn StuffStore>) -> Router<AppState> {
    Router::with_state(AppState::new(store))
        .get("/test", health::status::<AppState>)
        .get("/stuff", handlers::list)
        .post("/stuff", handlers::create)
        .get("/stuff/{id}", handlers::get)
        .delete("/stuff/{id}", handlers::delete)
}
