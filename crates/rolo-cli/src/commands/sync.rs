//! Sync command handler

use anyhow::{bail, Result};

use rolo_core::sync::push_outcome;
use rolo_core::{NoticeLevel, Store, SyncOrchestrator};

use crate::output::Output;

/// Push the full client set to the remote store
pub async fn sync(store: &Store, orchestrator: &SyncOrchestrator, output: &Output) -> Result<()> {
    let config = store.config();

    if !config.sync_enabled {
        bail!(
            "Sync is not enabled. Enable it with:\n  \
             rolo config set sync_enabled true\n  \
             rolo config set sync_url https://your-endpoint/exec"
        );
    }

    let Some(url) = orchestrator.remote_url() else {
        bail!(
            "Sync URL not configured. Set it with:\n  \
             rolo config set sync_url https://your-endpoint/exec"
        );
    };

    output.message(&format!(
        "Pushing {} client(s) to {}...",
        store.len(),
        url
    ));

    let result = orchestrator.push(store.clients()).await;
    let notice = push_outcome(&result);

    if let Err(err) = result {
        if notice.level == NoticeLevel::Error {
            output.message(&notice.text);
        }
        return Err(err.into());
    }

    output.success(&notice.text);
    Ok(())
}
