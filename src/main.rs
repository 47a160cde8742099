//! canonical-pages - Canonical page numbering for back-of-book indexing
//!
//! CLI entry point

use anyhow::Result;
use canonical_pages::{
    auto_join_contiguous_rules, exit_codes, normalize_page_range, parse_page_range,
    validate_page_range, validate_rule,
    // CLI
    CheckRulesArgs, Cli, Commands, ConvertArgs, ResolveArgs, ValidateRangeArgs,
    // Config
    Config, OutputConfig, OutputFormat,
    // Engine
    CanonicalPageRule, CanonicalPageSegment, CanonicalPages, NumeralCodec, NumeralError,
    NumeralType, PageNumberConflict, PageRangeError, ProjectSnapshot, Resolution, RuleConflict,
    RuleError, RuleJoin, SegmentFormatter, SnapshotError,
};
use clap::Parser;
use rayon::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::Level;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref());

    let result = match &cli.command {
        Commands::Resolve(args) => run_resolve(args, &config),
        Commands::CheckRules(args) => run_check_rules(args),
        Commands::ValidateRange(args) => run_validate_range(args),
        Commands::Convert(args) => run_convert(args),
        Commands::Info => run_info(cli.config.as_deref(), &config),
    };

    std::process::exit(match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    });
}

// ============ Setup ============

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Explicit path, else the lookup chain; fall back to defaults on failure
fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config file: {}", e);
        Config::default()
    })
}

fn snapshot_exit_code(error: &SnapshotError) -> i32 {
    match error {
        SnapshotError::NotFound(_) => exit_codes::INPUT_NOT_FOUND,
        SnapshotError::Parse(_) => exit_codes::INVALID_INPUT,
        SnapshotError::Io(_) => exit_codes::GENERAL_ERROR,
    }
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<SnapshotError>() {
            return snapshot_exit_code(e);
        }
        if cause.is::<NumeralError>() || cause.is::<PageRangeError>() || cause.is::<RuleError>() {
            return exit_codes::INVALID_INPUT;
        }
    }
    exit_codes::GENERAL_ERROR
}

// ============ Resolve Command ============

/// Outcome of resolving one snapshot file
struct SnapshotReport {
    snapshot: ProjectSnapshot,
    joins: Vec<RuleJoin>,
    overlaps: Vec<(String, RuleConflict)>,
    /// `None` when overlapping rules were rejected
    resolution: Option<Resolution>,
}

impl SnapshotReport {
    fn status(&self) -> &'static str {
        match &self.resolution {
            None => "rejected",
            Some(Resolution::Conflicted(_)) => "conflicted",
            Some(Resolution::Resolved(_)) => "resolved",
        }
    }

    fn exit_code(&self) -> i32 {
        match &self.resolution {
            None => exit_codes::INVALID_INPUT,
            Some(Resolution::Conflicted(_)) => exit_codes::CONFLICT,
            Some(Resolution::Resolved(_)) => exit_codes::SUCCESS,
        }
    }
}

fn resolve_snapshot(
    path: &Path,
    config: &Config,
) -> std::result::Result<SnapshotReport, SnapshotError> {
    let mut snapshot = ProjectSnapshot::load_from_path(path)?;

    let joins = if config.resolve.auto_join_rules {
        snapshot.auto_join_rules()
    } else {
        Vec::new()
    };

    let overlaps = snapshot.rule_overlaps();
    let resolution = if config.resolve.reject_overlapping_rules && !overlaps.is_empty() {
        tracing::warn!(
            path = %path.display(),
            overlaps = overlaps.len(),
            "Rejecting overlapping rules"
        );
        None
    } else {
        Some(snapshot.resolve())
    };

    Ok(SnapshotReport {
        snapshot,
        joins,
        overlaps,
        resolution,
    })
}

fn run_resolve(args: &ResolveArgs, file_config: &Config) -> Result<i32> {
    // CLI flags take precedence over the config file
    let config = file_config.merge_with_cli(&args.to_overrides());

    let outcomes: Vec<(&PathBuf, std::result::Result<SnapshotReport, SnapshotError>)> = args
        .snapshots
        .par_iter()
        .map(|path| (path, resolve_snapshot(path, &config)))
        .collect();

    let mut exit_code = exit_codes::SUCCESS;
    let mut json_reports = Vec::new();

    for (path, outcome) in outcomes {
        let code = match outcome {
            Ok(report) => {
                match config.output.format {
                    OutputFormat::Text => print_text_report(path, &report, &config.output),
                    OutputFormat::Json => {
                        json_reports.push(json_report(path, &report, &config.output))
                    }
                }
                report.exit_code()
            }
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                snapshot_exit_code(&e)
            }
        };

        if exit_code == exit_codes::SUCCESS {
            exit_code = code;
        }
    }

    if config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&json_reports)?);
    }

    Ok(exit_code)
}

fn span(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

fn rule_kind(rule: &CanonicalPageRule) -> String {
    if !rule.is_positive() {
        return "negative".to_string();
    }
    match rule.numeral_type {
        Some(numeral_type) => format!("positive, {}", numeral_type),
        None => "positive".to_string(),
    }
}

fn print_overlaps(overlaps: &[(String, RuleConflict)]) {
    for (rule_id, conflict) in overlaps {
        let later: Vec<&str> = conflict.existing_rules.iter().map(|r| r.id.as_str()).collect();
        let pages: Vec<String> = conflict.document_pages.iter().map(u32::to_string).collect();
        println!(
            "  Rule {} is overridden by {} on page(s) {}",
            rule_id,
            later.join(", "),
            pages.join(", ")
        );
    }
}

fn print_joins(joins: &[RuleJoin]) {
    for join in joins {
        println!(
            "  Joined rule {} into {} (pages {})",
            join.removed_rule_id,
            join.kept_rule_id,
            span(join.document_page_start, join.document_page_end)
        );
    }
}

fn print_conflicts(conflicts: &[PageNumberConflict]) {
    println!(
        "Conflicts: page number regions disagree on {} page(s)",
        conflicts.len()
    );
    for conflict in conflicts {
        let regions: Vec<String> = conflict
            .regions
            .iter()
            .map(|r| format!("{} ({})", r.name, r.id))
            .collect();
        println!("  page {}: {}", conflict.page_number, regions.join(", "));
    }
}

fn print_segments(segments: &[CanonicalPageSegment]) {
    println!("Segments:");
    for segment in segments {
        let canonical = match (
            segment.canonical_page_range.start.as_deref(),
            segment.canonical_page_range.end.as_deref(),
        ) {
            (Some(start), Some(end)) if start == end => start.to_string(),
            (Some(start), Some(end)) => format!("{}-{}", start, end),
            _ => "-".to_string(),
        };

        let mut detail = segment.source.to_string();
        if let Some(rule_id) = &segment.rule_id {
            detail.push_str(&format!(" [{}]", rule_id));
        }
        if !segment.region_names.is_empty() {
            detail.push_str(&format!(" [{}]", segment.region_names.join(", ")));
        }
        if let Some(label) = &segment.label {
            detail.push_str(&format!(" \"{}\"", label));
        }

        println!(
            "  {:>9}  {:>9}  {} {}",
            span(segment.document_page_range.start, segment.document_page_range.end),
            canonical,
            segment.color.emoji(),
            detail
        );
    }
}

fn print_statistics(pages: &CanonicalPages) {
    let stats = pages.statistics();
    println!("Statistics:");
    println!("  Total pages:      {}", stats.total_pages);
    println!("  Unaccounted:      {}", stats.unaccounted_pages);
    println!("  Region-derived:   {}", stats.region_derived_pages);
    println!("  Rule (positive):  {}", stats.user_defined_positive_pages);
    println!("  Rule (negative):  {}", stats.user_defined_negative_pages);
    println!("  Accounted:        {:.1}%", stats.accounted_ratio() * 100.0);
}

fn print_text_report(path: &Path, report: &SnapshotReport, output: &OutputConfig) {
    println!(
        "== {} ({} pages) ==",
        path.display(),
        report.snapshot.document_page_count
    );

    if !report.joins.is_empty() {
        println!("Joins:");
        print_joins(&report.joins);
    }
    if !report.overlaps.is_empty() {
        println!("Overlapping rules (later rules win):");
        print_overlaps(&report.overlaps);
    }

    match &report.resolution {
        None => println!("Rejected: rules overlap"),
        Some(Resolution::Conflicted(conflicts)) => print_conflicts(conflicts),
        Some(Resolution::Resolved(pages)) => {
            println!("{}", SegmentFormatter::format_canonical_pages_display(pages));
            if output.show_segments {
                let segments = SegmentFormatter::format_canonical_pages_with_metadata(
                    pages,
                    &report.snapshot.rules,
                    &report.snapshot.regions,
                );
                print_segments(&segments);
            }
            if output.show_statistics {
                print_statistics(pages);
            }
        }
    }
    println!();
}

fn json_report(path: &Path, report: &SnapshotReport, output: &OutputConfig) -> Value {
    let mut value = json!({
        "snapshot": path.display().to_string(),
        "documentPageCount": report.snapshot.document_page_count,
        "status": report.status(),
        "joins": report.joins,
        "overlaps": report
            .overlaps
            .iter()
            .map(|(rule_id, conflict)| json!({ "ruleId": rule_id, "conflict": conflict }))
            .collect::<Vec<_>>(),
    });

    match &report.resolution {
        None => {}
        Some(Resolution::Conflicted(conflicts)) => {
            value["conflicts"] = json!(conflicts);
        }
        Some(Resolution::Resolved(pages)) => {
            value["display"] = json!(SegmentFormatter::format_canonical_pages_display(pages));
            value["pages"] = json!(pages);
            if output.show_segments {
                value["segments"] = json!(SegmentFormatter::format_canonical_pages_with_metadata(
                    pages,
                    &report.snapshot.rules,
                    &report.snapshot.regions,
                ));
            }
            if output.show_statistics {
                value["statistics"] = json!(pages.statistics());
            }
        }
    }

    value
}

// ============ Check Rules Command ============

fn run_check_rules(args: &CheckRulesArgs) -> Result<i32> {
    let snapshot = ProjectSnapshot::load_from_path(&args.snapshot)?;
    let mut invalid = 0usize;

    println!("Rules ({}):", snapshot.rules.len());
    for rule in &snapshot.rules {
        let pages = span(rule.document_page_start, rule.document_page_end);
        match validate_rule(rule) {
            Ok(()) => println!("  ✓ {} ({}) pages {}", rule.id, rule_kind(rule), pages),
            Err(e) => {
                invalid += 1;
                println!("  ✗ {} ({}) pages {}: {}", rule.id, rule_kind(rule), pages, e);
            }
        }
        if rule.document_page_end > snapshot.document_page_count {
            println!(
                "    extends past the last document page ({})",
                snapshot.document_page_count
            );
        }
    }

    let overlaps = snapshot.rule_overlaps();
    if overlaps.is_empty() {
        println!("Overlaps: none");
    } else {
        println!("Overlaps ({}):", overlaps.len());
        print_overlaps(&overlaps);
    }

    let plan = auto_join_contiguous_rules(&snapshot.rules);
    if plan.joins.is_empty() {
        println!("Joinable rules: none");
    } else {
        println!("Joinable rules ({}):", plan.joins.len());
        print_joins(&plan.joins);
    }

    Ok(if invalid > 0 || !overlaps.is_empty() {
        exit_codes::INVALID_INPUT
    } else {
        exit_codes::SUCCESS
    })
}

// ============ Validate Range Command ============

fn run_validate_range(args: &ValidateRangeArgs) -> Result<i32> {
    let normalized = normalize_page_range(&args.range);

    if let Some(message) = validate_page_range(&normalized, args.max_page) {
        eprintln!("Invalid range: {}", message);
        return Ok(exit_codes::INVALID_INPUT);
    }

    let pages = parse_page_range(&normalized)?;
    let listed: Vec<String> = pages.iter().map(u32::to_string).collect();
    println!("Valid: {} page(s)", pages.len());
    println!("Pages: {}", listed.join(", "));

    Ok(exit_codes::SUCCESS)
}

// ============ Convert Command ============

fn run_convert(args: &ConvertArgs) -> Result<i32> {
    let value = args.value.trim();

    match NumeralCodec::detect_numeral_type(value) {
        NumeralType::Arabic => {
            let number: i64 = value
                .parse()
                .map_err(|_| NumeralError::InvalidNumeral(value.to_string()))?;
            println!("{}", NumeralCodec::number_to_roman(number)?);
        }
        NumeralType::Roman => {
            println!("{}", NumeralCodec::roman_to_number(value)?);
        }
        NumeralType::Arbitrary => {
            return Err(NumeralError::InvalidNumeral(value.to_string()).into());
        }
    }

    Ok(exit_codes::SUCCESS)
}

// ============ Info Command ============

fn run_info(explicit_config: Option<&Path>, config: &Config) -> Result<i32> {
    println!("canonical-pages v{}", env!("CARGO_PKG_VERSION"));

    println!();
    println!("Config File Locations:");
    if let Some(path) = explicit_config {
        println!("  Explicit: {}", path.display());
    }
    println!("  Local: ./{}", canonical_pages::config::CONFIG_FILE_NAME);
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir
                .join(canonical_pages::config::APP_CONFIG_DIR)
                .join("config.toml")
                .display()
        );
    }

    println!();
    println!("Effective Configuration:");
    for line in config.to_toml_string()?.lines() {
        println!("  {}", line);
    }

    Ok(exit_codes::SUCCESS)
}
