//! crates/mp_io/src/hasher.rs
//!
//! Deterministic hashing for canonical inputs.
//!
//! - Canonical JSON hashing: UTF-8, **sorted object keys**, array order
//!   preserved.
//! - Hex digests are **lowercase**.
//!
//! Digests fingerprint the engine's inputs; the orchestration-layer result
//! cache keys on them.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoResult;

/// SHA-256 of raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// SHA-256 of a value's canonical JSON bytes, lowercase hex.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

// === Tests ===
