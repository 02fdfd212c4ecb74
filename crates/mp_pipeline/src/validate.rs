//! crates/mp_pipeline/src/validate.rs
//! Structural & semantic validation before any computation.
//! Deterministic outputs; pure integer reasoning.

use std::collections::BTreeMap;

use mp_core::tokens::SubUnitName;
use mp_core::variables::DuplicatePolicy;

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
}

/// Deterministic report: pass = (no Error); issue ordering is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

/// Validate raw counts and resolve duplicates per policy.
///
/// Returns the normalized counts (input order preserved; under `MergeSum` a
/// duplicate collapses into its first occurrence) together with the report.
/// Normalized counts are only meaningful when `report.pass`.
pub fn normalize_counts(
    counts: &[(SubUnitName, u64)],
    total_quota: u32,
    policy: DuplicatePolicy,
) -> (Vec<(SubUnitName, u64)>, ValidationReport) {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    if counts.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "Counts.Empty",
            message: "region has no sub-units".to_string(),
        });
    }

    // Duplicate resolution, input order preserved.
    let mut normalized: Vec<(SubUnitName, u64)> = Vec::with_capacity(counts.len());
    let mut index_of: BTreeMap<&SubUnitName, usize> = BTreeMap::new();
    for (name, count) in counts {
        match index_of.get(name) {
            None => {
                index_of.insert(name, normalized.len());
                normalized.push((name.clone(), *count));
            }
            Some(&i) => match policy {
                DuplicatePolicy::Reject => {
                    issues.push(ValidationIssue {
                        severity: Severity::Error,
                        code: "Counts.DuplicateName",
                        message: format!("duplicate sub-unit name: {name}"),
                    });
                }
                DuplicatePolicy::MergeSum => {
                    normalized[i].1 += *count;
                    issues.push(ValidationIssue {
                        severity: Severity::Warning,
                        code: "Counts.DuplicateMerged",
                        message: format!("duplicate sub-unit {name} merged by sum"),
                    });
                }
            },
        }
    }

    // Shares are undefined when every count is zero but units must be handed out.
    let total: u128 = normalized.iter().map(|&(_, c)| c as u128).sum();
    if total == 0 && total_quota > 0 && !counts.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "Counts.AllZero",
            message: format!("all raw counts are zero but total_quota is {total_quota}"),
        });
    }

    sort_issues_stably(&mut issues);
    let pass = !issues.iter().any(|i| i.severity == Severity::Error);
    (normalized, ValidationReport { pass, issues })
}

/// Stable issue order (by code, then message) for byte-identical runs.
fn sort_issues_stably(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| match a.code.cmp(b.code) {
        core::cmp::Ordering::Equal => a.message.cmp(&b.message),
        o => o,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> SubUnitName {
        s.parse().unwrap()
    }

    #[test]
    fn empty_region_fails() {
        let (_, report) = normalize_counts(&[], 5, DuplicatePolicy::Reject);
        assert!(!report.pass);
        assert!(report.issues.iter().any(|i| i.code == "Counts.Empty"));
    }

    #[test]
    fn all_zero_with_quota_fails() {
        let counts = vec![(n("A"), 0), (n("B"), 0)];
        let (_, report) = normalize_counts(&counts, 5, DuplicatePolicy::Reject);
        assert!(!report.pass);
        assert!(report.issues.iter().any(|i| i.code == "Counts.AllZero"));
    }

    #[test]
    fn all_zero_without_quota_passes() {
        let counts = vec![(n("A"), 0), (n("B"), 0)];
        let (_, report) = normalize_counts(&counts, 0, DuplicatePolicy::Reject);
        assert!(report.pass);
    }

    #[test]
    fn duplicates_rejected_by_default_policy() {
        let counts = vec![(n("A"), 3), (n("A"), 4)];
        let (_, report) = normalize_counts(&counts, 5, DuplicatePolicy::Reject);
        assert!(!report.pass);
        assert!(report.issues.iter().any(|i| i.code == "Counts.DuplicateName"));
    }

    #[test]
    fn duplicates_merge_by_sum_with_warning() {
        let counts = vec![(n("B"), 1), (n("A"), 3), (n("A"), 4)];
        let (normalized, report) = normalize_counts(&counts, 5, DuplicatePolicy::MergeSum);
        assert!(report.pass);
        assert_eq!(normalized, vec![(n("B"), 1), (n("A"), 7)]);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn issue_order_is_stable() {
        let counts = vec![(n("B"), 0), (n("B"), 0), (n("A"), 0), (n("A"), 0)];
        let (_, r1) = normalize_counts(&counts, 9, DuplicatePolicy::Reject);
        let (_, r2) = normalize_counts(&counts, 9, DuplicatePolicy::Reject);
        assert_eq!(r1, r2);
        let codes: Vec<&str> = r1.issues.iter().map(|i| i.code).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }
}
