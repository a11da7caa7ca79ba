//! The `stuff` collection: record type, codecs, store backends and the HTTP
//! handlers over them.

mod error;
mod id;
mod memory;
mod model;
mod mongo;
mod store;

pub mod handlers;

pub use error::ApiError;
pub use id::{ParseIdError, StuffId};
pub use memory::MemoryStore;
pub use model::{DecodeError, NewStuff, Stuff};
pub use mongo::MongoStore;
pub use store::{StoreError, StuffStore};
