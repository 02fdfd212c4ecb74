//! BUILD — compose the ordered result records from prior pipeline stages.
//!
//! Deterministic assembly only: no I/O here. Rows are ordered by rank
//! ascending with ties broken by name ascending, the order consumers rely
//! on for tabular rendering and export.

use mp_algo::ranking::Category;
use mp_algo::recommend::Recommendation;
use mp_core::determinism::cmp_rank_then_name;
use mp_core::tokens::SubUnitName;

use crate::SubUnitRecord;

/// Stage outputs for one sub-unit, position-aligned with the normalized
/// counts slice.
pub(crate) struct StageRow {
    pub name: SubUnitName,
    pub raw_count: u64,
    pub allocation: u32,
    pub sam: u64,
    pub som: u64,
    pub rank: u32,
    pub category: Category,
    pub recommendation: Recommendation,
}

/// Order rows for display and freeze them into the output contract.
pub(crate) fn build_records(mut rows: Vec<StageRow>) -> Vec<SubUnitRecord> {
    rows.sort_by(|a, b| cmp_rank_then_name((a.rank, &a.name), (b.rank, &b.name)));
    rows.into_iter()
        .map(|r| SubUnitRecord {
            rank: r.rank,
            name: r.name,
            raw_count: r.raw_count,
            allocation: r.allocation,
            sam: r.sam,
            som: r.som,
            category: r.category,
            recommendation: r.recommendation,
        })
        .collect()
}
