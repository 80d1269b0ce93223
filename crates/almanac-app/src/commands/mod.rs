//! Subcommand implementations.
//!
//! Each command splits into a pure function over an in-memory [`Snapshot`]
//! and a `run` wrapper that reads the file and prints JSON.

pub mod expand;
pub mod orphans;

use std::path::Path;

use almanac_calendar::record::{Ingested, Snapshot, ingest};
use anyhow::{Context, Result};

/// ## Summary
/// Reads and ingests a snapshot file, logging every rejected record.
///
/// ## Errors
/// Returns an error if the file cannot be read or is not snapshot JSON.
pub fn load_snapshot(path: &Path) -> Result<Ingested> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    Ok(ingest_logged(snapshot))
}

pub(crate) fn ingest_logged(snapshot: Snapshot) -> Ingested {
    let ingested = ingest(snapshot);
    for rejected in &ingested.rejected {
        tracing::warn!(
            kind = %rejected.kind,
            event_id = %rejected.event_id,
            error = %rejected.error,
            "Skipping malformed record"
        );
    }
    ingested
}
