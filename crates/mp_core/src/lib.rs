//! mp_core — Core types, configuration domains, and exact arithmetic for the
//! MP engine.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`mp_io`, `mp_algo`, `mp_pipeline`, `mp_cli`).
//!
//! - Tokens: `RegionId` (strict ASCII token), `SubUnitName` (display name)
//! - Configuration: `RegionConfig`, `DuplicatePolicy`
//! - Integer-first numerics: exact `Ratio` with pinned rounding
//! - Deterministic ordering helpers
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod determinism;
pub mod errors;
pub mod rounding;
pub mod tokens;
pub mod variables;

pub use errors::{ConfigError, CoreError};
pub use rounding::Ratio;
pub use tokens::{RegionId, SubUnitName};
pub use variables::{DuplicatePolicy, RegionConfig};
