//! # Repositories
//!
//! The repositories own all CRUD and invariant maintenance, one per entity
//! collection. They are plain structs borrowing an explicitly constructed
//! [`crate::store::StoreAdapter`] — no ambient globals, no hidden
//! initialization. Clients build the adapter once and hand it to whichever
//! repositories they need.
//!
//! Every mutation is one synchronous read-modify-write of the whole
//! collection. Structural page mutations (create-with-parent, delete, move)
//! update both sides of the parent/child link inside that single write, so
//! the tree invariant holds after every operation settles.
//!
//! Error posture, per operation kind:
//! - Reads recover from corrupt records (empty collection, logged).
//! - Writes propagate failures as `Err` — a lost mutation is never silent.
//! - Addressing a missing id in update/delete/toggle is a logged no-op.
//! - Domain violations (`DuplicateEmail`, `SelfRemoval`, `InvalidMove`)
//!   fail before anything is written.

pub mod collaborators;
pub mod pages;

pub use collaborators::CollaboratorRepository;
pub use pages::PageRepository;
