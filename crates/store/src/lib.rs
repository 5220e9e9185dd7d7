//! Document store interface for the opina feedback pipeline
//!
//! This crate defines the persistence seam: a key-ordered document store
//! supporting "append under a collection path" and "subscribe to a filtered,
//! live-updated view of a collection". The in-memory implementation backs
//! tests and demos; a production backend would implement the same trait.

pub mod backend;
pub mod error;
pub mod memory;
pub mod subscription;

pub use backend::{Document, DocumentId, DocumentStore, Filter};
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryStore, MemoryStoreStats};
pub use subscription::Subscription;
