use std::path::PathBuf;

use almanac_core::util::date::parse_calendar_date;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "almanac", version, about = "Recurring event occurrence expansion")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Expand a store snapshot into occurrences over a date window
    Expand(ExpandArgs),
    /// List deviations whose date the event's rule no longer produces
    Orphans(OrphansArgs),
}

#[derive(Debug, clap::Args)]
pub struct ExpandArgs {
    /// Snapshot JSON file with `events` and `deviations`
    #[arg(short, long)]
    pub input: PathBuf,
    /// First date of the window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub start: NaiveDate,
    /// Last date of the window, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub end: NaiveDate,
    /// Merge all events into one chronological timeline
    #[arg(long)]
    pub sort: bool,
    /// Drop non-recurring events that fall outside the window
    #[arg(long)]
    pub clamp_single: bool,
    /// Fail if any record in the snapshot is malformed
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, clap::Args)]
pub struct OrphansArgs {
    /// Snapshot JSON file with `events` and `deviations`
    #[arg(short, long)]
    pub input: PathBuf,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(value).map_err(|err| err.to_string())
}
