//! Record Store: durable ownership of the whole book collection.
//!
//! `RecordStore` is the seam: the catalog only ever calls `load` and `save`,
//! so tests run against `InMemoryRecordStore` and deployments use
//! `JsonFileStore`.

mod error;
mod in_memory;
mod json_file;
mod record_store;

pub use error::StoreError;
pub use in_memory::InMemoryRecordStore;
pub use json_file::{decode_collection, encode_collection, JsonFileStore};
pub use record_store::RecordStore;
