//! Status command handler

use std::fs;

use anyhow::Result;

use rolo_core::{Store, SyncOrchestrator};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, orchestrator: &SyncOrchestrator, output: &Output) -> Result<()> {
    let config = store.config();
    let stats = store.stats();
    let clients_path = config.clients_path();
    let store_size = fs::metadata(&clients_path).map(|m| m.len()).unwrap_or(0);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "sync_enabled": config.sync_enabled,
                    "sync_url": config.sync_url,
                    "storage": {
                        "path": clients_path,
                        "exists": clients_path.exists(),
                        "size": store_size
                    },
                    "counts": {
                        "clients": stats.total,
                        "open_tasks": stats.open_tasks
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", stats.total);
        }
        OutputFormat::Human => {
            println!("rolo Status");
            println!("===========");
            println!();
            println!("Sync:");
            println!(
                "  Status: {}",
                if orchestrator.remote_enabled() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            if let Some(url) = orchestrator.remote_url() {
                println!("  Server: {}", url);
            }
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Size:     {}", human_size(store_size));
            println!();
            println!("Contents:");
            println!("  Clients:    {}", stats.total);
            println!("  Open tasks: {}", stats.open_tasks);
        }
    }

    Ok(())
}

/// Render a byte count for humans
fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}
