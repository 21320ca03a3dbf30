//! Object storage domain

mod object;
mod store;

pub use object::{StoredObject, JSON_CONTENT_TYPE};
pub use store::ObjectStore;
