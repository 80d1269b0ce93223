use almanac_calendar::orphan::{OrphanedDeviation, find_orphans};
use almanac_calendar::record::Ingested;
use anyhow::Result;

use crate::cli::OrphansArgs;

#[must_use]
pub fn orphans_in(ingested: &Ingested) -> Vec<OrphanedDeviation> {
    find_orphans(&ingested.events, &ingested.deviations)
}

/// ## Errors
/// Returns an error if the snapshot cannot be loaded.
pub fn run(args: &OrphansArgs) -> Result<()> {
    let ingested = super::load_snapshot(&args.input)?;
    let orphans = orphans_in(&ingested);
    if !orphans.is_empty() {
        tracing::info!(count = orphans.len(), "Found orphaned deviations");
    }
    println!("{}", serde_json::to_string_pretty(&orphans)?);
    Ok(())
}
