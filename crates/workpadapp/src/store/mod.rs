//! # Storage Layer
//!
//! Two pieces, split the same way throughout the crate:
//!
//! - [`KvBackend`]: raw string-keyed I/O — the "how" of storage. Values are
//!   opaque strings; every `set` replaces the whole value for that key.
//! - [`StoreAdapter`]: the typed persistence boundary — the "what". It
//!   serializes whole collections as JSON blobs under fixed keys and owns
//!   the recovery policy for unreadable records.
//!
//! ## Record layout
//!
//! ```text
//! notion-clone-pages          → JSON array of Page records
//! notion-clone-collaborators  → JSON array of Collaborator records
//! notion-clone-current-user   → bare string, the bootstrap collaborator id
//! ```
//!
//! ## Recovery policy
//!
//! Reads never fail: a missing or corrupt record logs a warning and yields
//! the empty collection. Writes propagate errors to the caller; nothing is
//! rolled back on failure, so callers re-read to observe truth.
//!
//! ## Implementations
//!
//! - [`FsKv`]: one file per key under a root directory, atomic writes.
//! - [`MemKv`]: in-memory map for testing logic without filesystem I/O.

mod adapter;
mod backend;
mod fs_kv;
mod mem_kv;

pub use adapter::{StoreAdapter, COLLABORATORS_KEY, CURRENT_USER_KEY, PAGES_KEY};
pub use backend::KvBackend;
pub use fs_kv::FsKv;
pub use mem_kv::MemKv;
