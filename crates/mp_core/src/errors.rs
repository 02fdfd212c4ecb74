//! crates/mp_core/src/errors.rs
//! Minimal error set for core-domain validation & parsing.

use core::fmt;

/// Errors raised while parsing or validating core tokens and values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    InvalidToken,
    InvalidName,
    InvalidRatio,
    InvalidDecimal,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidToken => write!(f, "invalid token"),
            CoreError::InvalidName => write!(f, "invalid sub-unit name"),
            CoreError::InvalidRatio => write!(f, "invalid ratio"),
            CoreError::InvalidDecimal => write!(f, "invalid decimal literal"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Errors raised by region configuration validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// `capacity_per_unit` must be >= 1.
    CapacityOutOfRange(u32),
    /// `obtainable_ratio` must lie strictly between 0 and 1.
    RatioOutOfRange(crate::rounding::Ratio),
    /// No configuration entry exists for the requested region.
    MissingRegion(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CapacityOutOfRange(c) => {
                write!(f, "capacity_per_unit out of range: {c} (must be >= 1)")
            }
            ConfigError::RatioOutOfRange(r) => {
                write!(f, "obtainable_ratio out of range: {r} (must be in (0,1))")
            }
            ConfigError::MissingRegion(id) => write!(f, "missing configuration for region {id}"),
        }
    }
}

impl std::error::Error for ConfigError {}
