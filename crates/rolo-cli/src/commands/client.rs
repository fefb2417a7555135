//! Client command handlers

use anyhow::{bail, Context, Result};

use rolo_core::{Client, ClientStatus, Store};

use crate::commands::resolve_client_id;
use crate::output::Output;
use crate::prompt::confirm;

/// Create a new client
#[allow(clippy::too_many_arguments)]
pub fn create(
    store: &mut Store,
    name: String,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    status: Option<String>,
    notes: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut client = Client::new(name);
    client.set_company(company);
    client.set_email(email);
    client.set_phone(phone);
    if let Some(status) = status {
        client.set_status(parse_status(&status)?);
    }
    if let Some(notes) = notes {
        client.set_notes(notes);
    }

    store.add_client(client.clone()).context("Failed to create client")?;

    output.success(&format!("Created client: {}", client.id));
    output.print_client(&client);

    Ok(())
}

/// List all clients, optionally filtered by status
pub fn list(store: &Store, status: Option<String>, output: &Output) -> Result<()> {
    let clients: Vec<Client> = match status {
        Some(ref s) => {
            let status = parse_status(s)?;
            store
                .clients()
                .iter()
                .filter(|c| c.status == status)
                .cloned()
                .collect()
        }
        None => store.clients().to_vec(),
    };

    output.print_clients(&clients);
    Ok(())
}

/// Show a single client
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let uuid = resolve_client_id(store, &id)?;

    let client = store
        .get_client(uuid)
        .ok_or_else(|| anyhow::anyhow!("Client not found: {}", id))?;

    output.print_client(client);
    Ok(())
}

/// Edit a client's fields
#[allow(clippy::too_many_arguments)]
pub fn edit(
    store: &mut Store,
    id: String,
    name: Option<String>,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    status: Option<String>,
    notes: Option<String>,
    output: &Output,
) -> Result<()> {
    let uuid = resolve_client_id(store, &id)?;

    let mut client = store
        .get_client(uuid)
        .ok_or_else(|| anyhow::anyhow!("Client not found: {}", id))?
        .clone();

    let mut changed = false;
    if let Some(name) = name {
        client.set_name(name);
        changed = true;
    }
    if let Some(company) = company {
        client.set_company(clearable(company));
        changed = true;
    }
    if let Some(email) = email {
        client.set_email(clearable(email));
        changed = true;
    }
    if let Some(phone) = phone {
        client.set_phone(clearable(phone));
        changed = true;
    }
    if let Some(status) = status {
        client.set_status(parse_status(&status)?);
        changed = true;
    }
    if let Some(notes) = notes {
        client.set_notes(notes);
        changed = true;
    }

    if !changed {
        bail!("Nothing to change. Pass at least one field flag (see `rolo client edit --help`).");
    }

    store
        .update_client(client.clone())
        .context("Failed to update client")?;

    output.success("Client updated");
    output.print_client(&client);

    Ok(())
}

/// Delete a client
pub fn delete(store: &mut Store, id: String, force: bool, output: &Output) -> Result<()> {
    let uuid = resolve_client_id(store, &id)?;

    let client = store
        .get_client(uuid)
        .ok_or_else(|| anyhow::anyhow!("Client not found: {}", id))?;

    if !force && output.should_prompt() {
        let question = format!("Delete client '{}'?", client.name);
        if !confirm(&question)? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    let removed = store
        .delete_client(uuid)
        .context("Failed to delete client")?
        .ok_or_else(|| anyhow::anyhow!("Client not found: {}", id))?;

    output.success(&format!("Deleted client '{}'", removed.name));
    Ok(())
}

/// Search clients
pub fn search(store: &Store, query: String, output: &Output) -> Result<()> {
    let clients = store.search(&query);
    output.print_clients(&clients);
    Ok(())
}

/// Parse a status argument with a helpful error
fn parse_status(s: &str) -> Result<ClientStatus> {
    s.parse::<ClientStatus>().map_err(anyhow::Error::msg)
}

/// "none" and the empty string clear an optional field
fn clearable(value: String) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value)
    }
}
