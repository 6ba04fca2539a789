//! Transactional named-graph storage.
//!
//! The dataset is a mapping from graph name to [`PrefixedGraph`]. All access
//! goes through [`GraphStorage`] transactions: any number of concurrent
//! readers, at most one writer, and a writer's changes only become visible to
//! readers when the transaction commits. Dropping a write transaction without
//! committing aborts it.

mod error;
mod memory;
mod storage;

pub use error::StorageError;
pub use memory::MemGraphStorage;
pub use storage::{GraphStorage, ReadTransaction, WriteTransaction};
