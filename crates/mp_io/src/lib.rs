//! crates/mp_io/src/lib.rs
//! Minimal, single-source-of-truth I/O crate.
//!
//! - No inline implementations: the **file modules** are re-exported to
//!   avoid drift.
//! - Shared error type (`IoError`) with `From` conversions used across
//!   modules.
//! - Strict offline posture: local files only, typed shapes, early
//!   validation at the boundary.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for mp_io (used by loader/canonical_json/hasher).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a location hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Input shape/domain failures caught at the boundary
    /// (negative counts, bad tokens, out-of-range config).
    #[error("invalid input: {0}")]
    Invalid(String),

    /// Hashing/canonicalization failures.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; callers may enrich
        // this at higher layers.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

/* ---------------- Public modules (single source of truth) ---------------- */

pub mod canonical_json;
pub mod hasher;
pub mod loader;

/* ---------------- Public prelude ---------------- */

pub mod prelude {
    pub use crate::loader::{load_config_file, load_counts_file, ConfigSet, CountsInput, RegionCounts};
    pub use crate::{IoError, IoResult};
}
