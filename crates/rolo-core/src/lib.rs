//! rolo core library
//!
//! This crate provides the core functionality for rolo, a local-first
//! client contact tracker with optional remote synchronization.
//!
//! # Architecture
//!
//! The in-memory [`Store`] is the single source of truth for a session.
//! Every mutation is persisted to a local JSON file immediately; the
//! remote store only changes when the user explicitly syncs, and then
//! the entire record set is pushed as one document.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a client
//! let mut client = Client::new("Acme Corp");
//! client.set_email(Some("contact@acme.example".into()));
//! store.add_client(client)?;
//!
//! // Push everything to the remote store
//! let orchestrator = SyncOrchestrator::new(store.config())?;
//! let result = orchestrator.push(store.clients()).await;
//! ```
//!
//! # Modules
//!
//! - `store`: In-memory client store (main entry point)
//! - `models`: Data structures for clients and tasks
//! - `storage`: Local JSON persistence
//! - `sync`: Remote push/pull and orchestration
//! - `config`: Application configuration
//! - `theme`: UI theme preference

pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod sync;
pub mod theme;

pub use config::Config;
pub use models::{Client, ClientStatus, Task};
pub use storage::{ClientPersistence, StorageError};
pub use store::{AssigneeTasks, Stats, Store, TaskEntry};
pub use sync::{Notice, NoticeLevel, PushReport, SyncClient, SyncError, SyncOrchestrator, SyncStatus};
pub use theme::Theme;
