//! CLI argument definitions

use crate::config::{CliOverrides, OutputFormat};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Canonical page numbering for back-of-book indexing
#[derive(Debug, Parser)]
#[command(name = "canonical-pages", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./canonical-pages.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve canonical pages for one or more project snapshots
    Resolve(ResolveArgs),
    /// Validate the rules of a snapshot and report overlaps and joins
    CheckRules(CheckRulesArgs),
    /// Validate a page range such as "1-5,8"
    ValidateRange(ValidateRangeArgs),
    /// Convert between Roman and Arabic numerals
    Convert(ConvertArgs),
    /// Show version and config locations
    Info,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Snapshot JSON files
    #[arg(required = true, value_name = "SNAPSHOT")]
    pub snapshots: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print segments with rule and region metadata
    #[arg(long)]
    pub segments: bool,

    /// Omit statistics
    #[arg(long)]
    pub no_stats: bool,

    /// Join contiguous continuing rules before resolving
    #[arg(long)]
    pub auto_join: bool,

    /// Fail when rules overlap instead of applying them last-wins
    #[arg(long)]
    pub reject_overlaps: bool,
}

impl ResolveArgs {
    /// Flags given on the command line; unset flags leave the config alone
    pub fn to_overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::new();
        if let Some(format) = self.format {
            overrides = overrides.with_format(format);
        }
        if self.segments {
            overrides = overrides.with_show_segments(true);
        }
        if self.no_stats {
            overrides = overrides.with_show_statistics(false);
        }
        if self.auto_join {
            overrides = overrides.with_auto_join_rules(true);
        }
        if self.reject_overlaps {
            overrides = overrides.with_reject_overlapping_rules(true);
        }
        overrides
    }
}

#[derive(Debug, Args)]
pub struct CheckRulesArgs {
    /// Snapshot JSON file
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

#[derive(Debug, Args)]
pub struct ValidateRangeArgs {
    /// Page range ("1-5", "1-2,5-6,8"); en-dashes are accepted
    pub range: String,

    /// Highest valid page
    #[arg(long)]
    pub max_page: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Roman numeral or decimal number
    pub value: String,
}
