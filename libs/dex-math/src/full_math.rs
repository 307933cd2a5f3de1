use dex_types::{DexError, FeeGrowth};
use primitive_types::{U256, U512};

/// Multiply and divide with 512-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, DexError> {
    let (quotient, _) = mul_div_rem(a, b, denominator)?;
    Ok(quotient)
}

/// Multiply and divide with 512-bit intermediate precision (rounds up)
/// Returns ceil((a * b) / denominator)
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, DexError> {
    let (quotient, has_remainder) = mul_div_rem(a, b, denominator)?;
    if has_remainder {
        quotient.checked_add(U256::one()).ok_or(DexError::MathOverflow)
    } else {
        Ok(quotient)
    }
}

fn mul_div_rem(a: U256, b: U256, denominator: U256) -> Result<(U256, bool), DexError> {
    if denominator.is_zero() {
        return Err(DexError::DivisionByZero);
    }

    let (quotient, remainder) = U512::div_mod(a.full_mul(b), U512::from(denominator));
    let quotient = U256::try_from(quotient).map_err(|_| DexError::MathOverflow)?;

    Ok((quotient, !remainder.is_zero()))
}

/// Unsigned division with rounding up
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, DexError> {
    if b.is_zero() {
        return Err(DexError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_mod(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::one())
    }
}

/// Narrow a 256-bit value to u128, failing instead of truncating
pub fn to_u128(value: U256) -> Result<u128, DexError> {
    if value.bits() > 128 {
        return Err(DexError::MathOverflow);
    }
    Ok(value.low_u128())
}

/// Widen a fee-growth accumulator to a single 256-bit integer
pub fn fee_growth_to_u256(growth: FeeGrowth) -> U256 {
    (U256::from(growth.hi) << 128u32) | U256::from(growth.lo)
}

/// Split a 256-bit integer into fee-growth words
pub fn fee_growth_from_u256(value: U256) -> FeeGrowth {
    FeeGrowth::new((value >> 128u32).low_u128(), value.low_u128())
}

/// floor(growth * liquidity / 2^128), used to turn a fee growth delta into tokens
pub fn mul_shift_128(growth: FeeGrowth, liquidity: u128) -> Result<u128, DexError> {
    let product = fee_growth_to_u256(growth).full_mul(U256::from(liquidity)) >> 128u32;
    let product = U256::try_from(product).map_err(|_| DexError::MathOverflow)?;
    to_u128(product)
}

/// floor(fee * 2^128 / liquidity), the fee growth one swap step adds
///
/// The result always fits in 256 bits, so a fee far larger than the
/// liquidity it is spread over still accrues.
pub fn div_shift_128(fee: u128, liquidity: u128) -> Result<FeeGrowth, DexError> {
    if liquidity == 0 {
        return Err(DexError::DivisionByZero);
    }
    Ok(fee_growth_from_u256(
        (U256::from(fee) << 128u32) / U256::from(liquidity),
    ))
}
