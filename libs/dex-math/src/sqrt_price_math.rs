use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up, to_u128};
use dex_types::{DexError, Q96};
use primitive_types::U256;

fn sort(sqrt_ratio_a_x96: u128, sqrt_ratio_b_x96: u128) -> (u128, u128) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Calculate amount0 delta for a price move from sqrt_ratio_a to sqrt_ratio_b
/// delta_x = L * (sqrt_pb - sqrt_pa) / (sqrt_pa * sqrt_pb)
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, DexError> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_lower == 0 {
        return Err(DexError::DivisionByZero);
    }

    let numerator1 = U256::from(liquidity) << 96u32;
    let numerator2 = U256::from(sqrt_ratio_upper - sqrt_ratio_lower);
    let upper = U256::from(sqrt_ratio_upper);
    let lower = U256::from(sqrt_ratio_lower);

    let amount = if round_up {
        div_rounding_up(mul_div_rounding_up(numerator1, numerator2, upper)?, lower)?
    } else {
        mul_div(numerator1, numerator2, upper)? / lower
    };
    to_u128(amount)
}

/// Calculate amount1 delta for a price move from sqrt_ratio_a to sqrt_ratio_b
/// delta_y = L * (sqrt_pb - sqrt_pa)
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, DexError> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);
    let difference = U256::from(sqrt_ratio_upper - sqrt_ratio_lower);

    let amount = if round_up {
        mul_div_rounding_up(liquidity, difference, U256::from(Q96))?
    } else {
        mul_div(liquidity, difference, U256::from(Q96))?
    };
    to_u128(amount)
}

/// Get next sqrt price after adding `amount_in` of the input token
///
/// Rounds so the pool never gives away more than the input pays for.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x96: u128,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> Result<u128, DexError> {
    if sqrt_price_x96 == 0 || liquidity == 0 {
        return Err(DexError::InsufficientLiquidity);
    }

    if zero_for_one {
        next_sqrt_price_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Get next sqrt price after removing `amount_out` of the output token
pub fn get_next_sqrt_price_from_output(
    sqrt_price_x96: u128,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> Result<u128, DexError> {
    if sqrt_price_x96 == 0 || liquidity == 0 {
        return Err(DexError::InsufficientLiquidity);
    }

    if zero_for_one {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_out, false)
    }
}

/// sqrt_price_next = L * sqrt_price / (L ± amount * sqrt_price)
fn next_sqrt_price_from_amount0_rounding_up(
    sqrt_price_x96: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<u128, DexError> {
    if amount == 0 {
        return Ok(sqrt_price_x96);
    }

    let numerator1 = U256::from(liquidity) << 96u32;
    let price = U256::from(sqrt_price_x96);
    // both factors are below 2^128
    let product = U256::from(amount) * price;

    let next = if add {
        match numerator1.checked_add(product) {
            Some(denominator) => mul_div_rounding_up(numerator1, price, denominator)?,
            // L / (L / p + amount), which loses precision but cannot overflow
            None => div_rounding_up(numerator1, numerator1 / price + U256::from(amount))?,
        }
    } else {
        if numerator1 <= product {
            return Err(DexError::InsufficientLiquidity);
        }
        mul_div_rounding_up(numerator1, price, numerator1 - product)?
    };
    to_u128(next)
}

/// sqrt_price_next = sqrt_price ± amount / L
fn next_sqrt_price_from_amount1_rounding_down(
    sqrt_price_x96: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<u128, DexError> {
    let shifted = U256::from(amount) << 96u32;
    let price = U256::from(sqrt_price_x96);

    if add {
        let quotient = shifted / U256::from(liquidity);
        to_u128(price + quotient)
    } else {
        let quotient = div_rounding_up(shifted, U256::from(liquidity))?;
        if price <= quotient {
            return Err(DexError::InsufficientLiquidity);
        }
        to_u128(price - quotient)
    }
}
