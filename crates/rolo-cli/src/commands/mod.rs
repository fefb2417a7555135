//! Command handlers

pub mod client;
pub mod config;
pub mod email;
pub mod stats;
pub mod status;
pub mod sync;
pub mod task;

use anyhow::{bail, Result};
use uuid::Uuid;

use rolo_core::Store;

/// Resolve a client ID from a full UUID or a unique prefix
pub fn resolve_client_id(store: &Store, id: &str) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let prefix = id.to_lowercase();
    let matches: Vec<Uuid> = store
        .clients()
        .iter()
        .filter(|c| c.id.to_string().starts_with(&prefix))
        .map(|c| c.id)
        .collect();

    match matches.len() {
        0 => bail!("No client found matching '{}'", id),
        1 => Ok(matches[0]),
        n => bail!(
            "'{}' is ambiguous ({} clients match). Use more characters.",
            id,
            n
        ),
    }
}

/// Resolve a task ID on a client from a full UUID or a unique prefix
pub fn resolve_task_id(store: &Store, client_id: Uuid, id: &str) -> Result<Uuid> {
    let client = store
        .get_client(client_id)
        .ok_or_else(|| anyhow::anyhow!("Client not found: {}", client_id))?;

    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let prefix = id.to_lowercase();
    let matches: Vec<Uuid> = client
        .tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(&prefix))
        .map(|t| t.id)
        .collect();

    match matches.len() {
        0 => bail!("No task found matching '{}'", id),
        1 => Ok(matches[0]),
        n => bail!(
            "'{}' is ambiguous ({} tasks match). Use more characters.",
            id,
            n
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolo_core::{Client, Config, Task};
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> Store {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        Store::open_with_config(config).unwrap()
    }

    #[test]
    fn test_resolve_client_id_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);

        let client = Client::new("Acme Corp");
        let id = client.id;
        store.add_client(client).unwrap();

        let prefix = &id.to_string()[..8];
        assert_eq!(resolve_client_id(&store, prefix).unwrap(), id);
        assert_eq!(resolve_client_id(&store, &id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_resolve_client_id_unknown() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(resolve_client_id(&store, "deadbeef").is_err());
    }

    #[test]
    fn test_resolve_task_id_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);

        let client = Client::new("Acme Corp");
        let client_id = client.id;
        store.add_client(client).unwrap();

        let task = Task::new("dina", "Send proposal");
        let task_id = task.id;
        store.add_task(client_id, task).unwrap();

        let prefix = &task_id.to_string()[..8];
        assert_eq!(resolve_task_id(&store, client_id, prefix).unwrap(), task_id);
    }
}
