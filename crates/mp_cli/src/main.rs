// crates/mp_cli/src/main.rs
//
// Wires up: exit codes, typed error mapping, CLI parsing, the validate-only
// short-circuit, and the run path (load → compute per region → render).
// Failures are per-region: a bad region is reported on stderr and the rest
// still render.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Input/config validation failures, including any failed region.
    pub const VALIDATION: i32 = 2;
    /// Filesystem / JSON read errors.
    pub const IO: i32 = 4;
}

use std::io::Write;
use std::process::ExitCode;

use args::{parse_and_validate, Args};

use mp_core::tokens::RegionId;
use mp_io::loader::{load_config_file, load_counts_file, CountsInput};
use mp_io::IoError;
use mp_pipeline::{compute_all, PipelineError, RegionResult};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Shape/domain/validation failures (exit 2).
    Validation(String),
    /// Read/path errors (exit 4).
    Io(String),
}

impl From<IoError> for MainError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Path(m) => MainError::Io(m),
            other => MainError::Validation(other.to_string()),
        }
    }
}

fn main() -> ExitCode {
    let (args, filter) = match parse_and_validate() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("mp: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = if args.validate_only {
        match validate_only(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => report(&e),
        }
    } else {
        match run_once(&args, &filter) {
            Ok(all_regions_ok) => {
                if all_regions_ok {
                    exitcodes::OK
                } else {
                    exitcodes::VALIDATION
                }
            }
            Err(e) => report(&e),
        }
    };

    ExitCode::from(rc as u8)
}

fn report(e: &MainError) -> i32 {
    match e {
        MainError::Validation(m) => {
            eprintln!("mp: error: {m}");
            exitcodes::VALIDATION
        }
        MainError::Io(m) => {
            eprintln!("mp: error: {m}");
            exitcodes::IO
        }
    }
}

/// Validate-only path: load both inputs to exercise shape/domain checks,
/// compute nothing.
fn validate_only(args: &Args) -> Result<(), MainError> {
    load_counts_file(&args.counts)?;
    load_config_file(&args.config)?;
    if !args.quiet {
        eprintln!("validate-only: inputs OK");
    }
    Ok(())
}

/// Full run. Returns Ok(true) when every selected region computed cleanly.
fn run_once(args: &Args, filter: &[RegionId]) -> Result<bool, MainError> {
    let counts = load_counts_file(&args.counts)?;
    let configs = load_config_file(&args.config)?;
    let counts = apply_filter(counts, filter)?;

    let outcomes = compute_all(&counts, &configs);

    let mut results: Vec<RegionResult> = Vec::with_capacity(outcomes.len());
    let mut all_ok = true;
    for (region_id, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                if !args.quiet {
                    for w in &result.warnings {
                        eprintln!("mp: warning: region {region_id}: {w}");
                    }
                }
                results.push(result);
            }
            Err(e) => {
                all_ok = false;
                eprintln!("mp: region {region_id} failed: {e}");
            }
        }
    }

    let rendered = match args.render.as_str() {
        "json" => render_json(&results)?,
        _ => render_table(&results),
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes()).map_err(|e| MainError::Io(e.to_string()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .map_err(|e| MainError::Io(e.to_string()))?;
        }
    }

    Ok(all_ok)
}

/// Restrict the counts input to the selected regions, preserving file
/// order. Asking for a region the counts file does not contain is an error.
fn apply_filter(counts: CountsInput, filter: &[RegionId]) -> Result<CountsInput, MainError> {
    if filter.is_empty() {
        return Ok(counts);
    }
    for wanted in filter {
        if !counts.regions.iter().any(|r| &r.region_id == wanted) {
            return Err(MainError::Validation(format!(
                "region {wanted} not present in counts file"
            )));
        }
    }
    let regions = counts
        .regions
        .into_iter()
        .filter(|r| filter.contains(&r.region_id))
        .collect();
    Ok(CountsInput { regions })
}

/* ---------------- Renderers ---------------- */

fn render_json(results: &[RegionResult]) -> Result<String, MainError> {
    let mut s = serde_json::to_string_pretty(results)
        .map_err(|e| MainError::Validation(e.to_string()))?;
    s.push('\n');
    Ok(s)
}

fn render_table(results: &[RegionResult]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&format!(
            "region {} (quota {}, homepass {})\n",
            result.region_id, result.total_quota, result.total_raw_count
        ));
        out.push_str(&format!(
            "{:>4}  {:<24} {:>9} {:>6} {:>7} {:>7}  {:<14}  {}\n",
            "rank", "sub-unit", "homepass", "odp", "sam", "som", "category", "recommendation"
        ));
        for r in &result.records {
            let category = match r.category {
                mp_algo::ranking::Category::HighPotential => "high",
                mp_algo::ranking::Category::LowPotential => "low",
            };
            out.push_str(&format!(
                "{:>4}  {:<24} {:>9} {:>6} {:>7} {:>7}  {:<14}  {}\n",
                r.rank,
                r.name.as_str(),
                r.raw_count,
                r.allocation,
                r.sam,
                r.som,
                category,
                r.recommendation.message()
            ));
        }
        out.push('\n');
    }
    out
}
