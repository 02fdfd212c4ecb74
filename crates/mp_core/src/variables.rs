//! crates/mp_core/src/variables.rs
//! Region configuration domains with safe defaults.
//!
//! Configuration is always supplied by the caller at invocation time; the
//! engine bakes in no region names, quotas, or paths.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::rounding::Ratio;

/// Subscriber lines realizable per allocation unit, absent explicit config.
pub const DEFAULT_CAPACITY_PER_UNIT: u32 = 16;

/// Obtainable share of the serviceable market, absent explicit config (3/10).
pub const DEFAULT_OBTAINABLE_RATIO: Ratio = Ratio { num: 3, den: 10 };

/// Policy for duplicate sub-unit names within one region's input.
///
/// Upstream parsing can produce the same name twice; silent overwrite is
/// never acceptable, so the caller picks one of these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Duplicate names fail the region with an input error.
    #[default]
    Reject,
    /// Duplicate names are pre-aggregated by summing their counts.
    MergeSum,
}

/// Per-region configuration, supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionConfig {
    /// Capacity units (ODP) to distribute across the region. Zero is legal
    /// and yields all-zero allocations.
    pub total_quota: u32,
    /// Subscriber lines per allocation unit (>= 1).
    pub capacity_per_unit: u32,
    /// Obtainable share of SAM, strictly between 0 and 1.
    pub obtainable_ratio: Ratio,
    /// Duplicate sub-unit name handling.
    pub duplicate_policy: DuplicatePolicy,
}

impl RegionConfig {
    /// Config with defaults for everything except the quota.
    pub fn with_quota(total_quota: u32) -> Self {
        RegionConfig {
            total_quota,
            capacity_per_unit: DEFAULT_CAPACITY_PER_UNIT,
            obtainable_ratio: DEFAULT_OBTAINABLE_RATIO,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Domain checks: capacity >= 1, ratio in (0,1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity_per_unit == 0 {
            return Err(ConfigError::CapacityOutOfRange(self.capacity_per_unit));
        }
        if !self.obtainable_ratio.is_proper_fraction() {
            return Err(ConfigError::RatioOutOfRange(self.obtainable_ratio));
        }
        Ok(())
    }
}
