//! Compound interest engine.
//!
//! Unsigned 64.64 fixed-point arithmetic over `u128`. Every multiplication
//! and division truncates toward zero at that step, so repeated compounding
//! lands one unit of the smallest denomination below the real-valued result.
//! Test vectors pin this behavior bit-for-bit.
//!
//! All functions are pure and safe to call from read-only projections.

use anchor_lang::prelude::*;

use crate::error::StakingError;

/// 1.0 in 64.64 fixed-point representation.
pub const FIXED_ONE: u128 = 1 << 64;

/// Mask selecting the fractional 64 bits of a fixed-point value.
const FRACTION_MASK: u128 = FIXED_ONE - 1;

/// Multiply two 64.64 fixed-point values, truncating the result.
///
/// Computes `floor(a * b / 2^64)` by splitting both operands into 64-bit
/// limbs so the full 256-bit product is never materialized.
fn mul_fixed(a: u128, b: u128) -> Result<u128> {
    let a_hi = a >> 64;
    let a_lo = a & FRACTION_MASK;
    let b_hi = b >> 64;
    let b_lo = b & FRACTION_MASK;

    // floor(a * b / 2^64) = a_hi*b_hi*2^64 + a_hi*b_lo + a_lo*b_hi
    //                       + floor(a_lo*b_lo / 2^64)
    let top = a_hi
        .checked_mul(b_hi)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(FIXED_ONE)
        .ok_or(StakingError::MathOverflow)?;
    let mid_a = a_hi.checked_mul(b_lo).ok_or(StakingError::MathOverflow)?;
    let mid_b = a_lo.checked_mul(b_hi).ok_or(StakingError::MathOverflow)?;
    let low = a_lo
        .checked_mul(b_lo)
        .ok_or(StakingError::MathOverflow)?
        >> 64;

    top.checked_add(mid_a)
        .and_then(|acc| acc.checked_add(mid_b))
        .and_then(|acc| acc.checked_add(low))
        .ok_or_else(|| error!(StakingError::MathOverflow))
}

/// Divide two integers into a 64.64 fixed-point quotient, truncating.
fn div_fixed(numerator: u64, denominator: u64) -> Result<u128> {
    let scaled = (numerator as u128) << 64;
    scaled
        .checked_div(denominator as u128)
        .ok_or_else(|| error!(StakingError::DivisionByZero))
}

/// Raise a 64.64 fixed-point base to an integer power by binary
/// exponentiation. Each squaring and multiplication truncates.
fn pow_fixed(mut base: u128, mut exponent: u64) -> Result<u128> {
    let mut result = FIXED_ONE;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_fixed(result, base)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = mul_fixed(base, base)?;
        }
    }
    Ok(result)
}

/// Scale an integer amount by a 64.64 fixed-point factor, truncating.
fn scale_amount(factor: u128, amount: u64) -> Result<u64> {
    let whole = (factor >> 64)
        .checked_mul(amount as u128)
        .ok_or(StakingError::MathOverflow)?;
    let fractional = (factor & FRACTION_MASK)
        .checked_mul(amount as u128)
        .ok_or(StakingError::MathOverflow)?
        >> 64;
    let scaled = whole
        .checked_add(fractional)
        .ok_or(StakingError::MathOverflow)?;

    u64::try_from(scaled).map_err(|_| error!(StakingError::MathOverflow))
}

/// Compute the compounded value of `principal` after `elapsed_periods` whole
/// compounding periods at `apy_percent` annual yield split across
/// `periods_per_year` periods:
///
/// `principal * (1 + apy_percent / (100 * periods_per_year)) ^ elapsed_periods`
///
/// Zero elapsed periods is the identity. Fractional period time never
/// reaches this function; callers count whole periods only.
///
/// # Errors
/// `MathOverflow` if the compounded value exceeds `u64`, `DivisionByZero`
/// if `periods_per_year` is zero.
pub fn compound(
    principal: u64,
    apy_percent: u64,
    periods_per_year: u64,
    elapsed_periods: u64,
) -> Result<u64> {
    if elapsed_periods == 0 || principal == 0 {
        return Ok(principal);
    }

    let denominator = periods_per_year
        .checked_mul(crate::constants::PERCENT_DENOMINATOR)
        .ok_or(StakingError::MathOverflow)?;
    let rate = div_fixed(apy_percent, denominator)?;
    let base = FIXED_ONE
        .checked_add(rate)
        .ok_or(StakingError::MathOverflow)?;
    let factor = pow_fixed(base, elapsed_periods)?;

    scale_amount(factor, principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_periods_is_identity() {
        assert_eq!(compound(1000, 12, 12, 0).unwrap(), 1000);
        assert_eq!(compound(u64::MAX, 12, 12, 0).unwrap(), u64::MAX);
        assert_eq!(compound(0, 12, 12, 0).unwrap(), 0);
    }

    #[test]
    fn zero_principal_stays_zero() {
        assert_eq!(compound(0, 12, 12, 5).unwrap(), 0);
        assert_eq!(compound(0, 99, 12, 500).unwrap(), 0);
    }

    #[test]
    fn reference_values_small_principal() {
        // 12% APY, monthly compounding. The fixed-point rate sits one ulp
        // below 0.01, so each result lands just under the exact figure.
        assert_eq!(compound(1000, 12, 12, 1).unwrap(), 1009);
        assert_eq!(compound(1000, 12, 12, 3).unwrap(), 1030);
        assert_eq!(compound(1000, 12, 12, 10).unwrap(), 1104);
    }

    #[test]
    fn reference_values_eight_decimals() {
        // 1000 tokens at 8 decimals: exact results would be 1010.00000000,
        // 1030.30100000 and 1104.62212542 tokens; truncation undershoots
        // each by a single base unit.
        assert_eq!(
            compound(100_000_000_000, 12, 12, 1).unwrap(),
            100_999_999_999
        );
        assert_eq!(
            compound(100_000_000_000, 12, 12, 3).unwrap(),
            103_030_099_999
        );
        assert_eq!(
            compound(100_000_000_000, 12, 12, 10).unwrap(),
            110_462_212_541
        );
    }

    #[test]
    fn reference_values_long_horizon() {
        // Ten years of monthly compounding at 12% APY.
        assert_eq!(
            compound(100_000_000_000, 12, 12, 120).unwrap(),
            330_038_689_457
        );
        assert_eq!(compound(1_000_000, 12, 12, 12).unwrap(), 1_126_825);
    }

    #[test]
    fn reference_values_other_rates() {
        assert_eq!(compound(10_000_000_000, 12, 12, 4).unwrap(), 10_406_040_099);
        assert_eq!(compound(5_000_000_000, 24, 12, 7).unwrap(), 5_743_428_338);
        assert_eq!(compound(1, 12, 12, 100).unwrap(), 2);
    }

    #[test]
    fn overflowing_result_is_rejected() {
        assert!(compound(u64::MAX, 100, 12, 600).is_err());
    }

    #[test]
    fn zero_periods_per_year_is_rejected() {
        assert!(compound(1000, 12, 0, 1).is_err());
    }

    proptest! {
        #[test]
        fn monotonic_in_elapsed_periods(
            principal in 0u64..=1_000_000_000_000_000,
            apy in 1u64..=100,
            periods in 0u64..=240,
        ) {
            let before = compound(principal, apy, 12, periods);
            let after = compound(principal, apy, 12, periods + 1);
            if let (Ok(before), Ok(after)) = (before, after) {
                prop_assert!(after >= before);
            }
        }

        #[test]
        fn monotonic_in_principal(
            principal in 0u64..=1_000_000_000_000_000,
            delta in 0u64..=1_000_000_000,
            apy in 1u64..=100,
            periods in 0u64..=240,
        ) {
            let smaller = compound(principal, apy, 12, periods);
            let larger = compound(principal + delta, apy, 12, periods);
            if let (Ok(smaller), Ok(larger)) = (smaller, larger) {
                prop_assert!(larger >= smaller);
            }
        }

        #[test]
        fn never_shrinks_principal(
            principal in 0u64..=1_000_000_000_000_000,
            apy in 1u64..=100,
            periods in 0u64..=240,
        ) {
            if let Ok(compounded) = compound(principal, apy, 12, periods) {
                prop_assert!(compounded >= principal);
            }
        }
    }
}
