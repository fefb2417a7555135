//! Sync orchestration
//!
//! Sequences the local store and the remote endpoint at the lifecycle
//! points: startup load (remote when enabled, local otherwise), explicit
//! user-triggered push, and the per-cycle status machine. Every failure
//! stops at this boundary and comes back as a [`Notice`]; local state
//! stays authoritative no matter what the remote does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::client::{PushReport, SyncClient, SyncError};
use super::notice::Notice;
use crate::config::Config;
use crate::models::Client;
use crate::store::Store;

/// Status of the current sync cycle
///
/// `Idle → Syncing → {Synced | SyncFailed}`, returning to `Idle` once
/// the result notification has been shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Synced,
    SyncFailed,
}

/// How the remote endpoint is configured
enum Remote {
    /// Sync turned off
    Disabled,
    /// Sync on, but no URL set
    Unconfigured,
    /// Ready to talk to the endpoint
    Ready(Arc<SyncClient>),
}

/// Orchestrates pushes and pulls against the remote store
///
/// At most one sync operation runs at a time: a second push or pull
/// while one is in flight is rejected with [`SyncError::InFlight`]
/// instead of racing two requests.
#[derive(Clone)]
pub struct SyncOrchestrator {
    remote: Arc<Remote>,
    in_flight: Arc<AtomicBool>,
    status_tx: Arc<watch::Sender<SyncStatus>>,
    status_rx: watch::Receiver<SyncStatus>,
}

/// Clears the in-flight flag when a sync operation ends
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl SyncOrchestrator {
    /// Create an orchestrator for the given configuration
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        let remote = if !config.sync_enabled {
            Remote::Disabled
        } else {
            match config.sync_url {
                Some(ref url) => {
                    Remote::Ready(Arc::new(SyncClient::new(url, config.sync_timeout())?))
                }
                None => Remote::Unconfigured,
            }
        };

        let (status_tx, status_rx) = watch::channel(SyncStatus::Idle);

        Ok(Self {
            remote: Arc::new(remote),
            in_flight: Arc::new(AtomicBool::new(false)),
            status_tx: Arc::new(status_tx),
            status_rx,
        })
    }

    /// Whether a remote endpoint is enabled and configured
    pub fn remote_enabled(&self) -> bool {
        matches!(*self.remote, Remote::Ready(_))
    }

    /// The configured endpoint URL, if any
    pub fn remote_url(&self) -> Option<&str> {
        match *self.remote {
            Remote::Ready(ref client) => Some(client.url()),
            _ => None,
        }
    }

    /// Current sync cycle status
    pub fn status(&self) -> SyncStatus {
        *self.status_rx.borrow()
    }

    /// Subscribe to status changes
    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status_rx.clone()
    }

    /// Return to `Idle` (after the result notification has been shown)
    pub fn reset_idle(&self) {
        self.set_status(SyncStatus::Idle);
    }

    /// Push the full record set to the remote endpoint
    pub async fn push(&self, clients: &[Client]) -> Result<PushReport, SyncError> {
        let client = self.ready()?;
        let _guard = self.begin()?;

        let result = client.push(clients).await;
        self.set_status(match result {
            Ok(_) => SyncStatus::Synced,
            Err(_) => SyncStatus::SyncFailed,
        });
        result
    }

    /// Pull the full record set from the remote endpoint
    pub async fn pull(&self) -> Result<Vec<Client>, SyncError> {
        let client = self.ready()?;
        let _guard = self.begin()?;

        let result = client.pull().await;
        self.set_status(match result {
            Ok(_) => SyncStatus::Synced,
            Err(_) => SyncStatus::SyncFailed,
        });
        result
    }

    /// Decide the authoritative source on startup
    ///
    /// When the remote is enabled, its contents replace the local set
    /// (and are persisted). When it is disabled or unreachable, the
    /// local set the store already loaded stays authoritative, and the
    /// failure (if any) is reported as a notice.
    pub async fn startup(&self, store: &mut Store) -> Option<Notice> {
        if !self.remote_enabled() {
            return None;
        }

        match self.pull().await {
            Ok(clients) => {
                let count = clients.len();
                info!("Loaded {} client(s) from remote", count);
                let notice = match store.replace_all(clients) {
                    Ok(()) => Notice::info(format!("Loaded {} client(s) from remote", count)),
                    Err(err) => {
                        warn!("Failed to persist remote clients locally: {}", err);
                        Notice::error(format!("Failed to save synced data locally: {}", err))
                    }
                };
                self.reset_idle();
                Some(notice)
            }
            Err(err) => {
                warn!("Remote load failed, keeping local data: {}", err);
                Some(Notice::error(format!("Failed to load from remote: {}", err)))
            }
        }
    }

    fn ready(&self) -> Result<&Arc<SyncClient>, SyncError> {
        match *self.remote {
            Remote::Ready(ref client) => Ok(client),
            Remote::Unconfigured => Err(SyncError::NotConfigured),
            Remote::Disabled => Err(SyncError::Disabled),
        }
    }

    /// Claim the in-flight slot, or reject if a sync is already running
    fn begin(&self) -> Result<InFlightGuard, SyncError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SyncError::InFlight);
        }

        self.set_status(SyncStatus::Syncing);
        Ok(InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        })
    }

    fn set_status(&self, status: SyncStatus) {
        let _ = self.status_tx.send(status);
    }
}
