//! crates/mp_core/src/rounding.rs
//! Integer-first ratio type and pinned rounding helpers.
//!
//! The engine never computes with binary floats: configuration ratios are
//! parsed from their decimal literals into exact `Ratio` values, and SOM
//! rounding is round-half-away-from-zero on exact integer arithmetic.

use core::cmp::Ordering;
use core::fmt;

use crate::errors::CoreError;

/// Exact ratio with normalized sign and positive denominator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio {
    pub num: i128,
    pub den: i128,
}

#[inline]
fn abs_i128(x: i128) -> i128 {
    if x < 0 {
        -x
    } else {
        x
    }
}

fn gcd_i128(mut a: i128, mut b: i128) -> i128 {
    a = abs_i128(a);
    b = abs_i128(b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    if a == 0 {
        1
    } else {
        a
    }
}

impl Ratio {
    /// Construct a ratio, ensuring `den > 0` and reducing by GCD.
    pub fn new(num: i128, den: i128) -> Result<Ratio, CoreError> {
        if den == 0 {
            return Err(CoreError::InvalidRatio);
        }
        let (mut n, mut d) = (num, den);
        if d < 0 {
            n = -n;
            d = -d;
        }
        let g = gcd_i128(n, d);
        Ok(Ratio { num: n / g, den: d / g })
    }

    /// Parse a decimal literal (`"0.3"`, `"16"`, `"2.5e-1"`) into an exact
    /// ratio. The text is taken at face value: `"0.3"` is exactly 3/10, not
    /// the nearest binary double.
    pub fn from_decimal_str(s: &str) -> Result<Ratio, CoreError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::InvalidDecimal);
        }

        // Split off an optional exponent part first.
        let (mantissa, exp) = match s.find(['e', 'E']) {
            Some(i) => {
                let e: i32 = s[i + 1..].parse().map_err(|_| CoreError::InvalidDecimal)?;
                (&s[..i], e)
            }
            None => (s, 0i32),
        };

        let (sign, digits) = match mantissa.strip_prefix('-') {
            Some(rest) => (-1i128, rest),
            None => (1i128, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CoreError::InvalidDecimal);
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(CoreError::InvalidDecimal);
        }

        let mut num: i128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            num = num
                .checked_mul(10)
                .and_then(|n| n.checked_add((b - b'0') as i128))
                .ok_or(CoreError::InvalidDecimal)?;
        }
        num *= sign;

        // Effective power of ten: fractional digits shift down, exponent shifts either way.
        let shift = exp - frac_part.len() as i32;
        let (mut n, mut d) = (num, 1i128);
        if shift >= 0 {
            for _ in 0..shift {
                n = n.checked_mul(10).ok_or(CoreError::InvalidDecimal)?;
            }
        } else {
            for _ in 0..(-shift) {
                d = d.checked_mul(10).ok_or(CoreError::InvalidDecimal)?;
            }
        }
        Ratio::new(n, d)
    }

    /// True iff the ratio lies strictly between 0 and 1.
    #[inline]
    pub fn is_proper_fraction(&self) -> bool {
        self.num > 0 && self.num < self.den
    }

    /// Multiply a nonnegative integer by this ratio and round
    /// half-away-from-zero. Requires a positive ratio.
    ///
    /// `k * num / den` with the half-point rounding decided on the exact
    /// remainder (`2r >= den` rounds up), so `25 * 3/10 = 7.5` yields 8.
    pub fn mul_round_half_away(&self, k: u64) -> u64 {
        debug_assert!(self.num >= 0 && self.den > 0);
        let t = (k as u128) * (self.num as u128);
        let den = self.den as u128;
        let q = t / den;
        let r = t % den;
        let rounded = if r * 2 >= den { q + 1 } else { q };
        rounded as u64
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Compare two ratios exactly (cross-multiply after GCD reduction).
pub fn compare_ratios(a: &Ratio, b: &Ratio) -> Ordering {
    let g1 = gcd_i128(a.num, b.num);
    let g2 = gcd_i128(a.den, b.den);
    let an = a.num / g1;
    let bn = b.num / g1;
    let ad = a.den / g2;
    let bd = b.den / g2;

    match (an.checked_mul(bd), bn.checked_mul(ad)) {
        (Some(l), Some(r)) => l.cmp(&r),
        // Only reachable for extreme magnitudes; ratios here come from short
        // decimal literals.
        _ => {
            let af = (a.num as f64) / (a.den as f64);
            let bf = (b.num as f64) / (b.den as f64);
            af.partial_cmp(&bf).unwrap_or(Ordering::Equal)
        }
    }
}

/// Exact `value >= mean(values)` test without division:
/// `value * n >= sum(values)`.
#[inline]
pub fn at_least_mean(value: u64, sum: u128, n: usize) -> bool {
    (value as u128) * (n as u128) >= sum
}

// === Tests ===
