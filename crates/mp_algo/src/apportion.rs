//! Largest-remainder apportionment over per-sub-unit raw counts.
//!
//! Contract:
//! - Shares are `c_i * Q / T` (Hare construction); floors via integer
//!   division, remainders via integer modulus. One shared denominator, so
//!   remainder comparison is exact.
//! - `deficit = Q - sum(floors)` lies in `[0, n-1]`; each of the `deficit`
//!   largest remainders takes one extra unit.
//! - Tie key for leftovers: remainder ↓, then sub-unit name ↑ (pinned).
//! - Every allocation is `floor` or `floor + 1`, and the final sum equals
//!   `Q` exactly; a post-hoc mismatch is a hard error, never a partial
//!   result.
//!
//! Determinism: no RNG, no policy; the name tie-break is total.

use std::collections::BTreeMap;

use mp_core::determinism::cmp_remainder_then_name;
use mp_core::tokens::SubUnitName;

#[derive(Debug, PartialEq, Eq)]
pub enum ApportionError {
    /// All counts are zero while `quota > 0`; shares are undefined.
    ZeroTotalCount,
    /// Post-hoc invariant check failed: allocations do not sum to the quota.
    /// Unreachable given the algorithm; asserted defensively.
    SumMismatch { expected: u32, actual: u64 },
}

impl core::fmt::Display for ApportionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApportionError::ZeroTotalCount => {
                write!(f, "total raw count is zero with a positive quota")
            }
            ApportionError::SumMismatch { expected, actual } => {
                write!(f, "allocation sum {actual} != quota {expected}")
            }
        }
    }
}

impl std::error::Error for ApportionError {}

/// Apportionment outcome: integer allocations plus a defensive flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apportionment {
    /// Final per-sub-unit allocation (floor or floor+1 of the share).
    pub allocations: BTreeMap<SubUnitName, u32>,
    /// Set when the computed deficit fell outside `[0, n-1]` and was
    /// clamped. Unreachable with exact integer math; surfaced as a warning
    /// upstream rather than silently ignored.
    pub deficit_clamped: bool,
}

/// Distribute `quota` units across sub-units proportionally to `counts`.
///
/// `counts` must already be deduplicated (names unique); empty input and
/// duplicate handling are validation concerns upstream. `quota == 0` yields
/// all-zero allocations without error.
pub fn apportion_largest_remainder(
    quota: u32,
    counts: &[(SubUnitName, u64)],
) -> Result<Apportionment, ApportionError> {
    // Trivial case: nothing to hand out.
    if quota == 0 {
        let allocations = counts.iter().map(|(n, _)| (n.clone(), 0u32)).collect();
        return Ok(Apportionment { allocations, deficit_clamped: false });
    }

    let total: u128 = counts.iter().map(|&(_, c)| c as u128).sum();
    if total == 0 {
        return Err(ApportionError::ZeroTotalCount);
    }

    // Floors and remainder numerators, one pass, exact.
    let mut allocations: BTreeMap<SubUnitName, u32> = BTreeMap::new();
    let mut remainders: Vec<(u128, &SubUnitName)> = Vec::with_capacity(counts.len());
    let mut base_sum: u128 = 0;

    for (name, count) in counts {
        let share_num = (*count as u128) * (quota as u128);
        let floor = share_num / total;
        let rem = share_num % total;
        base_sum += floor;
        // quota bounds every floor, so the narrowing is lossless.
        allocations.insert(name.clone(), floor as u32);
        remainders.push((rem, name));
    }

    // Deficit is mathematically in [0, n-1]; clamp defensively and flag.
    let raw_deficit = (quota as i128) - (base_sum as i128);
    let max_deficit = counts.len().saturating_sub(1) as i128;
    let deficit_clamped = raw_deficit < 0 || raw_deficit > max_deficit;
    let deficit = raw_deficit.clamp(0, max_deficit) as usize;

    // Largest remainders take one extra unit each; ties by name ascending.
    remainders.sort_by(|a, b| cmp_remainder_then_name((a.0, a.1), (b.0, b.1)));
    for &(_, name) in remainders.iter().take(deficit) {
        if let Some(a) = allocations.get_mut(name) {
            *a += 1;
        }
    }

    // Final invariant: the sum must hit the quota exactly.
    let sum: u64 = allocations.values().map(|&a| a as u64).sum();
    if sum != quota as u64 && !deficit_clamped {
        return Err(ApportionError::SumMismatch { expected: quota, actual: sum });
    }

    Ok(Apportionment { allocations, deficit_clamped })
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> Vec<(SubUnitName, u64)> {
        pairs.iter().map(|&(n, c)| (n.parse().unwrap(), c)).collect()
    }

    fn get(a: &Apportionment, name: &str) -> u32 {
        a.allocations[&name.parse::<SubUnitName>().unwrap()]
    }

    #[test]
    fn exact_division_leaves_no_deficit() {
        let input = counts(&[("A", 50), ("B", 30), ("C", 20)]);
        let a = apportion_largest_remainder(10, &input).unwrap();
        assert_eq!(get(&a, "A"), 5);
        assert_eq!(get(&a, "B"), 3);
        assert_eq!(get(&a, "C"), 2);
        assert!(!a.deficit_clamped);
    }

    #[test]
    fn remainder_tie_breaks_by_name_ascending() {
        // Three equal shares of 2/3 each; the two extra units go to A and B.
        let input = counts(&[("C", 1), ("A", 1), ("B", 1)]);
        let a = apportion_largest_remainder(2, &input).unwrap();
        assert_eq!(get(&a, "A"), 1);
        assert_eq!(get(&a, "B"), 1);
        assert_eq!(get(&a, "C"), 0);
    }

    #[test]
    fn zero_quota_allocates_nothing() {
        let input = counts(&[("A", 0), ("B", 0)]);
        let a = apportion_largest_remainder(0, &input).unwrap();
        assert!(a.allocations.values().all(|&v| v == 0));
    }

    #[test]
    fn zero_total_with_positive_quota_fails() {
        let input = counts(&[("A", 0), ("B", 0)]);
        assert_eq!(
            apportion_largest_remainder(5, &input),
            Err(ApportionError::ZeroTotalCount)
        );
    }

    #[test]
    fn allocations_stay_within_floor_and_floor_plus_one() {
        let input = counts(&[("A", 7), ("B", 11), ("C", 3), ("D", 29)]);
        let quota = 17u32;
        let total: u128 = input.iter().map(|&(_, c)| c as u128).sum();
        let a = apportion_largest_remainder(quota, &input).unwrap();
        for (name, count) in &input {
            let floor = ((*count as u128) * (quota as u128) / total) as u32;
            let got = a.allocations[name];
            assert!(got == floor || got == floor + 1, "{name}: {got} vs floor {floor}");
        }
        let sum: u64 = a.allocations.values().map(|&v| v as u64).sum();
        assert_eq!(sum, quota as u64);
    }

    #[test]
    fn single_sub_unit_takes_everything() {
        let input = counts(&[("Solo", 42)]);
        let a = apportion_largest_remainder(101, &input).unwrap();
        assert_eq!(get(&a, "Solo"), 101);
    }
}
