//! Competition ranking and potential classification on SOM.
//!
//! Contract:
//! - `rank_i = 1 + |{j : som_j > som_i}|`; equal SOM shares a rank and the
//!   next distinct value skips the shared slots. Ranks are always positive
//!   integers.
//! - `HighPotential` iff `som >= mean(som)` within the region, decided as
//!   `som * n >= sum(som)` so no float drift can flip a boundary case. The
//!   maximum-SOM sub-unit is therefore always `HighPotential`.

use mp_core::rounding::at_least_mean;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Market-potential class relative to the region's mean SOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    HighPotential,
    LowPotential,
}

/// Standard competition ranks for a SOM slice, position-aligned with the
/// input. O(n log n): sort indices by SOM descending, walk once.
pub fn competition_ranks(soms: &[u64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..soms.len()).collect();
    order.sort_by(|&a, &b| soms[b].cmp(&soms[a]));

    let mut ranks = vec![0u32; soms.len()];
    let mut prev_som: Option<u64> = None;
    let mut prev_rank = 1u32;
    for (pos, &i) in order.iter().enumerate() {
        let rank = match prev_som {
            Some(p) if p == soms[i] => prev_rank,
            _ => (pos + 1) as u32,
        };
        ranks[i] = rank;
        prev_som = Some(soms[i]);
        prev_rank = rank;
    }
    ranks
}

/// Classify each sub-unit against the region-local mean SOM.
pub fn classify(soms: &[u64]) -> Vec<Category> {
    let sum: u128 = soms.iter().map(|&s| s as u128).sum();
    let n = soms.len();
    soms.iter()
        .map(|&s| {
            if at_least_mean(s, sum, n) {
                Category::HighPotential
            } else {
                Category::LowPotential
            }
        })
        .collect()
}

// === Tests ===
