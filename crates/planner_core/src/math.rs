//! Fixed-point time arithmetic for deterministic planning.
//!
//! All planning costs are wall-clock seconds stored as fixed-point numbers.
//! Floating-point operations can produce different results on different
//! CPUs, and two planners fed the same snapshot must agree on the plan.

use fixed::types::I32F32;

/// Fixed-point number type for all time math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
/// Range: approximately -2,147,483,648 to 2,147,483,647
/// Precision: approximately 0.00000000023
pub type Fixed = I32F32;

/// Sentinel for a cost that cannot be paid in finite time.
///
/// Compares strictly greater than every finite cost. Use
/// [`add_time`] to keep sums from wrapping past it.
pub const INFINITE_TIME: Fixed = Fixed::MAX;

/// Seconds in one hour. Income is always expressed per hour.
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Fractional bits of [`Fixed`].
const FRAC_BITS: u32 = 32;

/// Returns true if `seconds` is the infinite sentinel.
#[inline]
#[must_use]
pub fn is_infinite(seconds: Fixed) -> bool {
    seconds == INFINITE_TIME
}

/// Add two durations, saturating at [`INFINITE_TIME`].
#[inline]
#[must_use]
pub fn add_time(a: Fixed, b: Fixed) -> Fixed {
    if is_infinite(a) || is_infinite(b) {
        INFINITE_TIME
    } else {
        a.saturating_add(b)
    }
}

/// Convert whole seconds to fixed-point seconds.
#[inline]
#[must_use]
pub fn seconds(n: i64) -> Fixed {
    Fixed::saturating_from_num(n)
}

/// Seconds of income needed to cover `needed` units at `income_per_hour`.
///
/// Returns zero when nothing is missing and [`INFINITE_TIME`] when
/// something is missing but income is not positive. Rounded up to the
/// next representable instant so that [`accrued`] over the result
/// covers `needed` exactly.
#[must_use]
pub fn time_to_accrue(needed: i64, income_per_hour: i64) -> Fixed {
    if needed <= 0 {
        return Fixed::ZERO;
    }
    if income_per_hour <= 0 {
        return INFINITE_TIME;
    }
    let numerator = (i128::from(needed) * i128::from(SECONDS_PER_HOUR)) << FRAC_BITS;
    let income = i128::from(income_per_hour);
    let bits = (numerator + income - 1) / income;
    i64::try_from(bits).map_or(INFINITE_TIME, Fixed::from_bits)
}

/// Whole units earned at `income_per_hour` over `elapsed` seconds.
///
/// Fractional units are truncated. Never negative.
#[must_use]
pub fn accrued(income_per_hour: i64, elapsed: Fixed) -> i64 {
    if income_per_hour <= 0 || elapsed <= Fixed::ZERO {
        return 0;
    }
    let units = (i128::from(elapsed.to_bits()) * i128::from(income_per_hour))
        / (i128::from(SECONDS_PER_HOUR) << FRAC_BITS);
    i64::try_from(units).unwrap_or(i64::MAX)
}

/// Construction slowdown for a headquarters level: `1.05^(level - 1)`.
///
/// Level 0 is treated as level 1 (a fresh village still builds).
#[must_use]
pub fn build_time_factor(headquarters_level: u32) -> Fixed {
    let step = Fixed::from_num(21) / Fixed::from_num(20);
    let mut factor = Fixed::ONE;
    for _ in 1..headquarters_level.max(1) {
        factor = factor.saturating_mul(step);
    }
    factor
}

/// Serde support for fixed-point seconds written as whole seconds.
///
/// Snapshot files carry queue timers as plain integers; the fractional
/// part is dropped on serialization.
pub mod whole_seconds_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize fixed-point seconds as whole seconds.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_num::<i64>().serialize(serializer)
    }

    /// Deserialize whole seconds into fixed-point seconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = i64::deserialize(deserializer)?;
        Ok(Fixed::saturating_from_num(secs))
    }
}
