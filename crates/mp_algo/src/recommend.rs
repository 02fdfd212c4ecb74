//! Recommendation decision table.
//!
//! Total over every reachable `(category, som, sam, raw_count)` combination
//! and side-effect free. Thresholds are compared exactly:
//! "SOM below 60% of SAM" is `5 * som < 3 * sam` in integers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ranking::Category;

/// Fixed guidance buckets for a sub-unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Recommendation {
    /// High potential, obtainable share lagging the serviceable market.
    ExpandCoverage,
    /// High potential and performing; no action beyond monitoring.
    MaintainAndMonitor,
    /// Low potential but a dense footprint worth local promotion.
    LocalPromotionFocus,
    /// Low potential, low footprint; resources go elsewhere.
    Deprioritize,
}

impl Recommendation {
    /// Fixed human-readable guidance message.
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::ExpandCoverage => "Strengthen promotion and expand coverage.",
            Recommendation::MaintainAndMonitor => "Performance on target. Keep monitoring.",
            Recommendation::LocalPromotionFocus => "Low potential. Focus on local promotion.",
            Recommendation::Deprioritize => "Not a priority. Reallocate resources.",
        }
    }
}

/// Raw count above which a low-potential sub-unit still warrants local
/// promotion when its SOM stays under `LOW_SOM_CEILING`.
const DENSE_FOOTPRINT_FLOOR: u64 = 100;
const LOW_SOM_CEILING: u64 = 20;

/// Map a classified sub-unit to its guidance bucket.
pub fn recommend(category: Category, som: u64, sam: u64, raw_count: u64) -> Recommendation {
    match category {
        Category::HighPotential => {
            // SOM < SAM * 0.6, exact: 5*som < 3*sam.
            if 5 * (som as u128) < 3 * (sam as u128) {
                Recommendation::ExpandCoverage
            } else {
                Recommendation::MaintainAndMonitor
            }
        }
        Category::LowPotential => {
            if raw_count > DENSE_FOOTPRINT_FLOOR && som < LOW_SOM_CEILING {
                Recommendation::LocalPromotionFocus
            } else {
                Recommendation::Deprioritize
            }
        }
    }
}

// === Tests ===
