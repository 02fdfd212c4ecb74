// crates/mp_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure algorithm layer for the MP engine.
//!
//! Four stages, each a pure function, run in pipeline order:
//! apportion → metrics → rank/classify → recommend. No I/O, no clocks, no
//! RNG; identical inputs give byte-identical outputs.

// File modules (actual implementations)
pub mod apportion;
pub mod metrics;
pub mod ranking;
pub mod recommend;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use apportion::{apportion_largest_remainder, Apportionment, ApportionError};
pub use metrics::{serviceable_available, serviceable_obtainable};
pub use ranking::{classify, competition_ranks, Category};
pub use recommend::{recommend, Recommendation};
