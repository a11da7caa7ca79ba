//! # stuffd
//!
//! A small JSON CRUD service over one MongoDB collection.
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/test` | `200 {"status": "ok"}` |
//! | GET | `/stuff` | `200` array of every record |
//! | POST | `/stuff` | `201` created record, `Location: <host>/stuff/<id>` |
//! | GET | `/stuff/{id}` | `200` record, `404` if absent |
//! | DELETE | `/stuff/{id}` | `200`, `404` if absent |
//!
//! Malformed ids and bodies answer `400`, store failures `500`; error
//! responses carry `{"error": "..."}`. Trailing slashes are ignored and every
//! response is `application/json`.
//!
//! ## Layout
//!
//! The HTTP layer ([`Router`], [`Server`], [`Request`], [`Response`]) knows
//! nothing about records. [`app::build_router`] wires the [`stuff`] handlers
//! onto it over any [`StuffStore`](stuff::StuffStore):
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stuffd::{Config, Server, app, stuff::MongoStore};
//!
//! # async fn run() -> Result<(), stuffd::Error> {
//! let config = Config::from_env();
//! let store = MongoStore::connect(&config).await?;
//! let router = app::build_router(Arc::new(store));
//! Server::bind(config.listen_addr).serve(router).await
//! # }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod app;
pub mod config;
pub mod health;
pub mod middleware;
pub mod stuff;
pub mod telemetry;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_with_shutdown, shutdown_signal};
