//! Stats command handler

use anyhow::Result;

use rolo_core::Store;

use crate::output::Output;

/// Show summary statistics over the client set
pub fn show(store: &Store, output: &Output) -> Result<()> {
    output.print_stats(&store.stats());
    Ok(())
}
