use crate::full_math::{mul_div, to_u128};
use dex_types::{DexError, Q96};
use primitive_types::U256;

/// Calculate the largest liquidity that the given amounts can pay for
///
/// Below the range only token0 counts, above it only token1, and inside it the
/// scarcer of the two bounds the result.
pub fn get_liquidity_for_amounts(
    sqrt_ratio_x96: u128,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    amount0: u128,
    amount1: u128,
) -> Result<u128, DexError> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    if sqrt_ratio_x96 <= sqrt_ratio_lower {
        get_liquidity_for_amount0(sqrt_ratio_lower, sqrt_ratio_upper, amount0)
    } else if sqrt_ratio_x96 < sqrt_ratio_upper {
        let liquidity0 = get_liquidity_for_amount0(sqrt_ratio_x96, sqrt_ratio_upper, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(sqrt_ratio_lower, sqrt_ratio_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount1(sqrt_ratio_lower, sqrt_ratio_upper, amount1)
    }
}

/// L = amount0 * sqrt_pa * sqrt_pb / (sqrt_pb - sqrt_pa)
fn get_liquidity_for_amount0(
    sqrt_ratio_lower: u128,
    sqrt_ratio_upper: u128,
    amount0: u128,
) -> Result<u128, DexError> {
    let intermediate = mul_div(
        U256::from(sqrt_ratio_lower),
        U256::from(sqrt_ratio_upper),
        U256::from(Q96),
    )?;
    to_u128(mul_div(
        U256::from(amount0),
        intermediate,
        U256::from(sqrt_ratio_upper - sqrt_ratio_lower),
    )?)
}

/// L = amount1 / (sqrt_pb - sqrt_pa)
fn get_liquidity_for_amount1(
    sqrt_ratio_lower: u128,
    sqrt_ratio_upper: u128,
    amount1: u128,
) -> Result<u128, DexError> {
    to_u128(mul_div(
        U256::from(amount1),
        U256::from(Q96),
        U256::from(sqrt_ratio_upper - sqrt_ratio_lower),
    )?)
}

/// Add signed liquidity delta to unsigned liquidity
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128, DexError> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(DexError::InsufficientLiquidity)
    } else {
        liquidity
            .checked_add(delta as u128)
            .ok_or(DexError::MathOverflow)
    }
}
