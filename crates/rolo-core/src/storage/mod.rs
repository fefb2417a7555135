//! Storage layer
//!
//! Durable local storage for the client set: one JSON file holding the
//! full serialized sequence, fully rewritten on every save. A load
//! composed with a save reproduces the same sequence.
//!
//! Failures never take the application down: a missing or corrupted
//! store loads as empty (corrupted files are quarantined first), and
//! write failures come back as typed [`StorageError`]s for the caller
//! to surface.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::ClientPersistence;
