//! Task command handlers

use anyhow::{Context, Result};

use rolo_core::{Store, Task};

use crate::commands::{resolve_client_id, resolve_task_id};
use crate::output::Output;

/// Add a task to a client
pub fn create(
    store: &mut Store,
    client_id: String,
    description: String,
    assignee: String,
    output: &Output,
) -> Result<()> {
    let uuid = resolve_client_id(store, &client_id)?;

    let task = Task::new(assignee, description);
    let task_id = task.id;

    if !store.add_task(uuid, task).context("Failed to add task")? {
        anyhow::bail!("Client not found: {}", client_id);
    }

    output.success(&format!("Added task: {}", task_id));
    Ok(())
}

/// List tasks grouped by assignee
pub fn list(
    store: &Store,
    assignee: Option<String>,
    open_only: bool,
    output: &Output,
) -> Result<()> {
    let groups = store.tasks_by_assignee();

    let groups = match assignee {
        Some(ref name) => groups
            .into_iter()
            .filter(|g| g.assignee.eq_ignore_ascii_case(name))
            .collect(),
        None => groups,
    };

    output.print_task_groups(&groups, open_only);
    Ok(())
}

/// Mark a task done
pub fn done(store: &mut Store, client_id: String, task_id: String, output: &Output) -> Result<()> {
    let client_uuid = resolve_client_id(store, &client_id)?;
    let task_uuid = resolve_task_id(store, client_uuid, &task_id)?;

    if !store
        .set_task_done(client_uuid, task_uuid, true)
        .context("Failed to update task")?
    {
        anyhow::bail!("Task not found: {}", task_id);
    }

    output.success("Task done");
    Ok(())
}

/// Remove a task from a client
pub fn delete(
    store: &mut Store,
    client_id: String,
    task_id: String,
    output: &Output,
) -> Result<()> {
    let client_uuid = resolve_client_id(store, &client_id)?;
    let task_uuid = resolve_task_id(store, client_uuid, &task_id)?;

    if !store
        .delete_task(client_uuid, task_uuid)
        .context("Failed to delete task")?
    {
        anyhow::bail!("Task not found: {}", task_id);
    }

    output.success("Task removed");
    Ok(())
}
