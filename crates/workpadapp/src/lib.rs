//! # Workpad Architecture
//!
//! Workpad is a **UI-agnostic workspace library**: hierarchical pages holding
//! typed content blocks, persisted as whole-collection JSON records in a
//! local key-value store. The CLI in `crates/workpad` is just one client.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (crates/workpad, or any other UI)                   │
//! │  - Argument parsing, rendering, terminal I/O                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repositories (repo/)                                       │
//! │  - CRUD + tree mutation for pages                           │
//! │  - CRUD + identity bootstrap for collaborators              │
//! │  - Own all invariant maintenance (parent/child links)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store layer (store/)                                       │
//! │  - StoreAdapter: typed collections over fixed keys          │
//! │  - KvBackend trait: FsKv (production), MemKv (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in this crate takes normal Rust values, returns normal Rust
//! types, never writes to stdout/stderr and never assumes a terminal.
//!
//! ## Persistence model
//!
//! Every mutation is a full read-modify-write of one collection: the
//! repository reads the whole collection from the adapter, computes the new
//! collection, and writes it back in a single call. There is no partial
//! update and no indexing. Execution is single-threaded and synchronous, so
//! no operation can interleave mid-mutation; concurrent access from a second
//! process is unguarded (last writer wins on the whole record).
//!
//! ## Module Overview
//!
//! - [`model`]: Core data types (`Page`, `Block`, `Collaborator`, patches)
//! - [`store`]: Storage abstraction and implementations
//! - [`repo`]: Page and collaborator repositories
//! - [`tree`]: Tree traversal and link-invariant verification
//! - [`error`]: Error types

pub mod error;
pub mod model;
pub mod repo;
pub mod store;
pub mod tree;
