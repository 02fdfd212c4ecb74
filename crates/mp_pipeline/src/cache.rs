//! Time-windowed result cache, owned by the orchestration layer.
//!
//! The algorithms never memoize; callers that want to reuse a recent
//! computation key it here on the full identity of the inputs:
//! `(region_id, sha256(config), sha256(counts))`. Time is injected by the
//! caller; this module never reads a clock.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use mp_core::tokens::{RegionId, SubUnitName};
use mp_core::variables::RegionConfig;
use mp_io::hasher::sha256_canonical;

use crate::{compute_region, PipelineError, RegionResult};

/// Default reuse window, matching the reference deployment.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CacheKey {
    region_id: RegionId,
    config_sha256: String,
    counts_sha256: String,
}

struct CacheEntry {
    stored_at: Instant,
    result: RegionResult,
}

/// TTL cache over whole-region results.
pub struct ResultCache {
    ttl: Duration,
    entries: BTreeMap<CacheKey, CacheEntry>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        ResultCache { ttl, entries: BTreeMap::new() }
    }

    /// Return a cached result when its window is still open, otherwise
    /// compute, store, and return. Errors are never cached; a failed
    /// region is recomputed on every call.
    pub fn get_or_compute(
        &mut self,
        now: Instant,
        region_id: &RegionId,
        counts: &[(SubUnitName, u64)],
        config: &RegionConfig,
    ) -> Result<RegionResult, PipelineError> {
        let key = CacheKey {
            region_id: region_id.clone(),
            config_sha256: sha256_canonical(config).map_err(PipelineError::from)?,
            counts_sha256: sha256_canonical(&counts).map_err(PipelineError::from)?,
        };

        if let Some(entry) = self.entries.get(&key) {
            if now.duration_since(entry.stored_at) < self.ttl {
                return Ok(entry.result.clone());
            }
        }

        let result = compute_region(region_id, counts, config)?;
        self.entries.insert(key, CacheEntry { stored_at: now, result: result.clone() });
        Ok(result)
    }

    /// Drop every entry whose window has closed.
    pub fn evict_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries.retain(|_, e| now.duration_since(e.stored_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// === Tests ===
