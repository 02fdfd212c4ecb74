//! mp_pipeline — deterministic pipeline surface
//! (validate → apportion → metrics → rank/classify → recommend → build).
//!
//! This crate stays I/O-free for the computation itself and delegates
//! JSON/digest concerns to `mp_io` and math to `mp_algo`. A region either
//! produces a fully valid, invariant-satisfying result set or an error,
//! never a partial result. Regions are mutually independent; `compute_all`
//! reports per-region outcomes so callers can degrade gracefully.

#![forbid(unsafe_code)]

use mp_algo::apportion::{apportion_largest_remainder, ApportionError};
use mp_algo::metrics::{serviceable_available, serviceable_obtainable};
use mp_algo::ranking::{classify, competition_ranks, Category};
use mp_algo::recommend::{recommend, Recommendation};
use mp_core::errors::ConfigError;
use mp_core::tokens::{RegionId, SubUnitName};
use mp_core::variables::RegionConfig;
use mp_io::loader::{ConfigSet, CountsInput};

pub mod build_result;
pub mod cache;
pub mod validate;

use build_result::{build_records, StageRow};
use validate::normalize_counts;

/// One output row; the durable contract consumers rely on.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubUnitRecord {
    pub rank: u32,
    pub name: SubUnitName,
    pub raw_count: u64,
    pub allocation: u32,
    pub sam: u64,
    pub som: u64,
    pub category: Category,
    pub recommendation: Recommendation,
}

/// A region's complete, immutable computation output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegionResult {
    pub region_id: RegionId,
    pub total_quota: u32,
    pub total_raw_count: u64,
    /// Ordered by rank ascending, ties by name ascending.
    pub records: Vec<SubUnitRecord>,
    /// Non-fatal findings (duplicate merges, defensive clamps).
    pub warnings: Vec<String>,
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug)]
pub enum PipelineError {
    /// Invalid input: empty region, all-zero counts with a positive quota,
    /// duplicate names under the reject policy.
    Validate(String),
    /// Configuration domain failure or missing region config.
    Config(String),
    /// Post-hoc apportionment consistency failure (unreachable by
    /// construction; asserted defensively).
    InvariantViolation(String),
    /// I/O or shape failure from the loading layer.
    Io(String),
}

impl core::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PipelineError::Validate(m) => write!(f, "invalid input: {m}"),
            PipelineError::Config(m) => write!(f, "configuration error: {m}"),
            PipelineError::InvariantViolation(m) => {
                write!(f, "apportionment invariant violation: {m}")
            }
            PipelineError::Io(m) => write!(f, "io error: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<mp_io::IoError> for PipelineError {
    fn from(e: mp_io::IoError) -> Self {
        match e {
            mp_io::IoError::Invalid(m) => PipelineError::Validate(m),
            other => PipelineError::Io(other.to_string()),
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Config(e.to_string())
    }
}

/// Compute one region end-to-end.
///
/// Pure given its inputs: identical `(counts, config)` always yields a
/// byte-identical `RegionResult`, and repeated calls are safe; nothing is
/// memoized here (see `cache` for the orchestration-layer cache).
pub fn compute_region(
    region_id: &RegionId,
    counts: &[(SubUnitName, u64)],
    config: &RegionConfig,
) -> Result<RegionResult, PipelineError> {
    // VALIDATE: config domains, then counts shape per duplicate policy.
    config.validate()?;
    let (normalized, report) = normalize_counts(counts, config.total_quota, config.duplicate_policy);
    if !report.pass {
        let joined = report
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.code, i.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(PipelineError::Validate(format!("region {region_id}: {joined}")));
    }
    let mut warnings: Vec<String> =
        report.warnings().map(|i| format!("{}: {}", i.code, i.message)).collect();

    // APPORTION.
    let apportionment =
        apportion_largest_remainder(config.total_quota, &normalized).map_err(|e| match e {
            ApportionError::ZeroTotalCount => {
                PipelineError::Validate(format!("region {region_id}: {e}"))
            }
            ApportionError::SumMismatch { .. } => {
                PipelineError::InvariantViolation(format!("region {region_id}: {e}"))
            }
        })?;
    if apportionment.deficit_clamped {
        warnings.push("Apportion.DeficitClamped: leftover-unit count fell outside [0, n-1]".to_string());
    }

    // METRICS.
    let allocations: Vec<u32> =
        normalized.iter().map(|(name, _)| apportionment.allocations[name]).collect();
    let sams: Vec<u64> =
        allocations.iter().map(|&a| serviceable_available(a, config.capacity_per_unit)).collect();
    let soms: Vec<u64> =
        sams.iter().map(|&s| serviceable_obtainable(s, &config.obtainable_ratio)).collect();

    // RANK / CLASSIFY.
    let ranks = competition_ranks(&soms);
    let categories = classify(&soms);

    // RECOMMEND + BUILD.
    let rows: Vec<StageRow> = normalized
        .iter()
        .enumerate()
        .map(|(i, (name, raw_count))| StageRow {
            name: name.clone(),
            raw_count: *raw_count,
            allocation: allocations[i],
            sam: sams[i],
            som: soms[i],
            rank: ranks[i],
            category: categories[i],
            recommendation: recommend(categories[i], soms[i], sams[i], *raw_count),
        })
        .collect();

    let total_raw_count: u64 = normalized.iter().map(|&(_, c)| c).sum();
    Ok(RegionResult {
        region_id: region_id.clone(),
        total_quota: config.total_quota,
        total_raw_count,
        records: build_records(rows),
        warnings,
    })
}

/// Compute every region in the input, independently and atomically.
///
/// Outcomes come back in input (file) order; one region's failure never
/// poisons another.
pub fn compute_all(
    counts: &CountsInput,
    configs: &ConfigSet,
) -> Vec<(RegionId, Result<RegionResult, PipelineError>)> {
    counts
        .regions
        .iter()
        .map(|rc| {
            let outcome = match configs.get(&rc.region_id) {
                Ok(cfg) => compute_region(&rc.region_id, &rc.sub_units, cfg),
                Err(e) => Err(PipelineError::from(e)),
            };
            (rc.region_id.clone(), outcome)
        })
        .collect()
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::rounding::Ratio;
    use mp_core::variables::DuplicatePolicy;

    fn n(s: &str) -> SubUnitName {
        s.parse().unwrap()
    }

    fn region() -> RegionId {
        "testreg".parse().unwrap()
    }

    #[test]
    fn allocation_sum_matches_quota_exactly() {
        let counts = vec![(n("A"), 7), (n("B"), 11), (n("C"), 3)];
        let cfg = RegionConfig::with_quota(17);
        let result = compute_region(&region(), &counts, &cfg).unwrap();
        let sum: u64 = result.records.iter().map(|r| r.allocation as u64).sum();
        assert_eq!(sum, 17);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn sam_is_allocation_times_capacity_for_every_record() {
        let counts = vec![(n("A"), 50), (n("B"), 30), (n("C"), 20)];
        let mut cfg = RegionConfig::with_quota(10);
        cfg.capacity_per_unit = 8;
        let result = compute_region(&region(), &counts, &cfg).unwrap();
        for r in &result.records {
            assert_eq!(r.sam, r.allocation as u64 * 8);
        }
    }

    #[test]
    fn missing_config_maps_to_config_error() {
        let io_err = ConfigError::MissingRegion("nowhere".into());
        assert!(matches!(PipelineError::from(io_err), PipelineError::Config(_)));
    }

    #[test]
    fn duplicate_names_fail_under_reject() {
        let counts = vec![(n("A"), 5), (n("A"), 5)];
        let cfg = RegionConfig::with_quota(4);
        let err = compute_region(&region(), &counts, &cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Validate(_)));
    }

    #[test]
    fn duplicate_names_merge_under_merge_sum() {
        let counts = vec![(n("A"), 5), (n("A"), 5), (n("B"), 10)];
        let mut cfg = RegionConfig::with_quota(4);
        cfg.duplicate_policy = DuplicatePolicy::MergeSum;
        let result = compute_region(&region(), &counts, &cfg).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.total_raw_count, 20);
        assert_eq!(result.warnings.len(), 1);
        // A and B merged to equal counts: 2 units each.
        for r in &result.records {
            assert_eq!(r.allocation, 2);
        }
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let counts = vec![(n("Purwantoro"), 923), (n("Blimbing"), 310), (n("Pandanwangi"), 581)];
        let mut cfg = RegionConfig::with_quota(42);
        cfg.obtainable_ratio = Ratio { num: 3, den: 10 };
        let a = compute_region(&region(), &counts, &cfg).unwrap();
        let b = compute_region(&region(), &counts, &cfg).unwrap();
        assert_eq!(a, b);
        let ja = serde_json::to_string(&a).unwrap();
        let jb = serde_json::to_string(&b).unwrap();
        assert_eq!(ja, jb);
    }

    #[test]
    fn config_domain_failure_is_config_error() {
        let counts = vec![(n("A"), 5)];
        let mut cfg = RegionConfig::with_quota(4);
        cfg.capacity_per_unit = 0;
        assert!(matches!(
            compute_region(&region(), &counts, &cfg),
            Err(PipelineError::Config(_))
        ));
    }
}
