//! Market metrics derived from an allocation.
//!
//! Both are pure functions. SAM is exact integer multiplication; SOM is the
//! obtainable share rounded half-away-from-zero on the exact rational.

use mp_core::rounding::Ratio;

/// Serviceable Available Market: `allocation * capacity_per_unit`, exact.
#[inline]
pub fn serviceable_available(allocation: u32, capacity_per_unit: u32) -> u64 {
    (allocation as u64) * (capacity_per_unit as u64)
}

/// Serviceable Obtainable Market: `round(sam * obtainable_ratio)`,
/// half-away-from-zero. The ratio is validated upstream to lie in (0,1).
#[inline]
pub fn serviceable_obtainable(sam: u64, obtainable_ratio: &Ratio) -> u64 {
    obtainable_ratio.mul_round_half_away(sam)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sam_is_exact() {
        assert_eq!(serviceable_available(5, 16), 80);
        assert_eq!(serviceable_available(0, 16), 0);
        assert_eq!(serviceable_available(u32::MAX, u32::MAX), u32::MAX as u64 * u32::MAX as u64);
    }

    #[test]
    fn som_rounds_half_away_from_zero() {
        let r = Ratio { num: 3, den: 10 };
        assert_eq!(serviceable_obtainable(80, &r), 24);
        assert_eq!(serviceable_obtainable(48, &r), 14); // 14.4 down
        assert_eq!(serviceable_obtainable(32, &r), 10); // 9.6 up
        assert_eq!(serviceable_obtainable(25, &r), 8); // 7.5 away from zero
    }
}
