use almanac_calendar::cache::OccurrenceCache;
use almanac_calendar::expand::{DateWindow, ExpansionOptions};
use almanac_calendar::model::{Occurrence, sort_chronologically};
use almanac_calendar::record::Ingested;
use almanac_core::config::Settings;
use anyhow::Result;

use crate::cli::ExpandArgs;

/// ## Summary
/// Expands ingested records over the window named in `args`.
///
/// The window is bounded by `expansion.max_window_days`. The clamp flag is
/// on when either the argument or the configuration enables it.
///
/// ## Errors
/// Returns an error if the window is inverted or too long, or if `--strict`
/// is set and a record was rejected.
pub fn expand_ingested(
    ingested: Ingested,
    args: &ExpandArgs,
    settings: &Settings,
) -> Result<Vec<Occurrence>> {
    let window = DateWindow::bounded(args.start, args.end, settings.expansion.max_window_days)?;

    let (events, deviations) = if args.strict {
        ingested.into_strict()?
    } else {
        (ingested.events, ingested.deviations)
    };

    let mut options = ExpansionOptions::from(&settings.expansion);
    options.clamp_single_occurrences |= args.clamp_single;

    let mut cache = OccurrenceCache::new(options);
    let mut occurrences = cache.expand_all(&events, window, &deviations);
    if args.sort {
        sort_chronologically(&mut occurrences);
    }

    tracing::info!(
        events = events.len(),
        occurrences = occurrences.len(),
        start = %window.start(),
        end = %window.end(),
        "Expanded snapshot"
    );
    Ok(occurrences)
}

/// ## Errors
/// Returns an error if the snapshot cannot be loaded or expanded.
pub fn run(args: &ExpandArgs, settings: &Settings) -> Result<()> {
    let ingested = super::load_snapshot(&args.input)?;
    let occurrences = expand_ingested(ingested, args, settings)?;
    println!("{}", serde_json::to_string_pretty(&occurrences)?);
    Ok(())
}
