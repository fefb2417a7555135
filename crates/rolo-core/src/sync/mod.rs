//! Remote sync
//!
//! Synchronization with a remote HTTP store that holds the full client
//! set as one document.
//!
//! ## Protocol
//!
//! - `POST <sync_url>` with the full set as a JSON array replaces the
//!   remote dataset; the endpoint replies `{"success": bool,
//!   "message"?: string}`.
//! - `GET <sync_url>` returns `{"clients": [...]}` with the same record
//!   shape.
//!
//! There are no partial updates and no per-record identity on the wire;
//! the client assumes it is the remote store's sole writer.
//!
//! ## Usage
//!
//! ```ignore
//! let orchestrator = SyncOrchestrator::new(store.config())?;
//! let result = orchestrator.push(store.clients()).await;
//! let notice = sync::push_outcome(&result);
//! ```

mod client;
mod notice;
mod orchestrator;

#[cfg(test)]
pub(crate) mod testserver;

pub use client::{PushReport, SyncClient, SyncError};
pub use notice::{push_outcome, Notice, NoticeLevel};
pub use orchestrator::{SyncOrchestrator, SyncStatus};
