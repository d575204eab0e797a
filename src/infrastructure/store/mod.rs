//! Key-value storage layer.
//!
//! Every collection of the warehouse is kept as one JSON document under a
//! fixed key (see [`keys`]). Three [`KvStore`] backends exist:
//! - [`MemoryStore`] - process-local, used by tests and throwaway runs
//! - [`FileStore`] - one `<key>.json` file per key in a data directory
//! - [`RedisStore`] - Redis strings, optionally prefixed
//!
//! [`Document`] layers typed JSON access with defaults on top of a store.

mod document;
mod file_store;
pub mod keys;
mod memory_store;
mod redis_store;
mod service;

pub use document::Document;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use service::{KvStore, StoreError, StoreResult};
