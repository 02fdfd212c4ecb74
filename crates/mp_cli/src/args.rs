// crates/mp_cli/src/args.rs
//
// Deterministic, offline CLI argument parsing surface.
//
// Rules:
// - Local files only (reject any scheme:// path)
// - Required inputs: --counts and --config
// - Optional region filter: --region (repeatable)
// - Output: --render [json|table] (default table), --out FILE (default stdout)
// - --validate-only performs load + shape/domain checks without computing

use clap::Parser;
use std::path::{Path, PathBuf};

use mp_core::tokens::RegionId;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "mp",
    disable_help_subcommand = true,
    about = "Offline, deterministic market-potential engine CLI"
)]
pub struct Args {
    /// Per-region sub-unit counts JSON path.
    #[arg(long)]
    pub counts: PathBuf,

    /// Per-region configuration JSON path.
    #[arg(long)]
    pub config: PathBuf,

    /// Compute only the named region(s); default is every region in the
    /// counts file. Repeatable.
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Output format.
    #[arg(long, value_parser = ["json", "table"], default_value = "table")]
    pub render: String,

    /// Write rendered output to a file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Validate inputs only (load + shape/domain checks), do not compute.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress non-essential stderr diagnostics.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NotFound(&'static str, PathBuf),
    NotAFile(&'static str, PathBuf),
    UrlRejected(&'static str, String),
    BadRegion(String),
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CliError::NotFound(flag, p) => write!(f, "--{flag}: not found: {}", p.display()),
            CliError::NotAFile(flag, p) => write!(f, "--{flag}: not a file: {}", p.display()),
            CliError::UrlRejected(flag, s) => {
                write!(f, "--{flag}: networked paths are not supported: {s}")
            }
            CliError::BadRegion(s) => write!(f, "--region: invalid region token: {s}"),
        }
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`).
#[inline]
fn looks_like_url(s: &str) -> bool {
    s.contains("://")
}

fn check_input_file(flag: &'static str, path: &Path) -> Result<(), CliError> {
    let text = path.to_string_lossy();
    if looks_like_url(&text) {
        return Err(CliError::UrlRejected(flag, text.into_owned()));
    }
    if !path.exists() {
        return Err(CliError::NotFound(flag, path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(CliError::NotAFile(flag, path.to_path_buf()));
    }
    Ok(())
}

/// Parse argv and run filesystem/token checks clap cannot express.
pub fn parse_and_validate() -> Result<(Args, Vec<RegionId>), CliError> {
    let args = Args::parse();
    validate(args)
}

/// Validation split out from argv parsing for tests.
pub fn validate(args: Args) -> Result<(Args, Vec<RegionId>), CliError> {
    check_input_file("counts", &args.counts)?;
    check_input_file("config", &args.config)?;

    let mut filter = Vec::with_capacity(args.regions.len());
    for raw in &args.regions {
        let id: RegionId = raw.parse().map_err(|_| CliError::BadRegion(raw.clone()))?;
        filter.push(id);
    }
    Ok((args, filter))
}

// === Tests ===
