//! Record store
//!
//! The `Store` holds the authoritative in-memory client sequence for the
//! session and keeps the on-disk copy current: every mutation is applied
//! in place and then written through the persistence layer immediately,
//! so a later remote push always observes what the user last did.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // loads the local set (empty on first run)
//!
//! let client = Client::new("Acme Corp");
//! store.add_client(client)?;
//!
//! for client in store.clients() {
//!     println!("{}", client.name);
//! }
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Client, ClientStatus, Task};
use crate::storage::{ClientPersistence, StorageResult};

/// In-memory client store backed by the local persistence layer
pub struct Store {
    /// The client sequence, in insertion order
    clients: Vec<Client>,
    /// Persistence handler for the client set
    persistence: ClientPersistence,
    /// Configuration
    config: Config,
}

/// Summary counts over the client set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub leads: usize,
    pub active: usize,
    pub on_hold: usize,
    pub closed: usize,
    pub open_tasks: usize,
}

/// One task with the client it belongs to, for per-assignee listings
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEntry {
    pub client_id: Uuid,
    pub client_name: String,
    pub task: Task,
}

/// All tasks belonging to one assignee
#[derive(Debug, Clone, PartialEq)]
pub struct AssigneeTasks {
    pub assignee: String,
    pub tasks: Vec<TaskEntry>,
}

impl Store {
    /// Open the store, loading the client set from local storage
    ///
    /// A missing or corrupted local store yields an empty set; the
    /// application always starts.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = ClientPersistence::new(config.clone());
        let clients = persistence.load();

        Ok(Self {
            clients,
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the current client sequence
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Number of clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the store holds no clients
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Replace the entire sequence (after a load from the remote store)
    ///
    /// The new sequence is persisted immediately. No validation is
    /// performed on record shape.
    pub fn replace_all(&mut self, clients: Vec<Client>) -> StorageResult<()> {
        self.clients = clients;
        self.save()
    }

    /// Add a client
    pub fn add_client(&mut self, client: Client) -> StorageResult<()> {
        self.clients.push(client);
        self.save()
    }

    /// Replace an existing client. Returns false if the ID is unknown.
    pub fn update_client(&mut self, client: Client) -> StorageResult<bool> {
        match self.clients.iter_mut().find(|c| c.id == client.id) {
            Some(slot) => {
                *slot = client;
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete a client, returning the removed record if it existed
    pub fn delete_client(&mut self, id: Uuid) -> StorageResult<Option<Client>> {
        match self.clients.iter().position(|c| c.id == id) {
            Some(pos) => {
                let removed = self.clients.remove(pos);
                self.save()?;
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    /// Get a client by ID
    pub fn get_client(&self, id: Uuid) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Attach a task to a client. Returns false if the client is unknown.
    pub fn add_task(&mut self, client_id: Uuid, task: Task) -> StorageResult<bool> {
        match self.clients.iter_mut().find(|c| c.id == client_id) {
            Some(client) => {
                client.add_task(task);
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Mark a task done (or not). Returns false if client or task is unknown.
    pub fn set_task_done(
        &mut self,
        client_id: Uuid,
        task_id: Uuid,
        done: bool,
    ) -> StorageResult<bool> {
        match self.clients.iter_mut().find(|c| c.id == client_id) {
            Some(client) => {
                if client.set_task_done(task_id, done) {
                    self.save()?;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            _ => Ok(false),
        }
    }

    /// Remove a task. Returns false if client or task is unknown.
    pub fn delete_task(&mut self, client_id: Uuid, task_id: Uuid) -> StorageResult<bool> {
        match self.clients.iter_mut().find(|c| c.id == client_id) {
            Some(client) => {
                if client.remove_task(task_id) {
                    self.save()?;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            _ => Ok(false),
        }
    }

    /// Case-insensitive search over name, company, email, and notes
    pub fn search(&self, query: &str) -> Vec<Client> {
        let query = query.to_lowercase();
        self.clients
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&query)
                    || c.company
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
                    || c.email
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
                    || c.notes.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Summary counts over the current set
    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            total: self.clients.len(),
            ..Stats::default()
        };

        for client in &self.clients {
            match client.status {
                ClientStatus::Lead => stats.leads += 1,
                ClientStatus::Active => stats.active += 1,
                ClientStatus::OnHold => stats.on_hold += 1,
                ClientStatus::Closed => stats.closed += 1,
            }
            stats.open_tasks += client.open_task_count();
        }

        stats
    }

    /// All tasks grouped by assignee, assignees in alphabetical order
    pub fn tasks_by_assignee(&self) -> Vec<AssigneeTasks> {
        let mut groups: Vec<AssigneeTasks> = Vec::new();

        for client in &self.clients {
            for task in &client.tasks {
                let entry = TaskEntry {
                    client_id: client.id,
                    client_name: client.name.clone(),
                    task: task.clone(),
                };

                match groups.iter_mut().find(|g| g.assignee == task.assignee) {
                    Some(group) => group.tasks.push(entry),
                    None => groups.push(AssigneeTasks {
                        assignee: task.assignee.clone(),
                        tasks: vec![entry],
                    }),
                }
            }
        }

        groups.sort_by(|a, b| a.assignee.cmp(&b.assignee));
        groups
    }

    fn save(&self) -> StorageResult<()> {
        self.persistence.save(&self.clients)
    }
}
