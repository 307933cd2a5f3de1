use crate::full_math::{mul_div, mul_div_rounding_up, to_u128};
use crate::sqrt_price_math::{
    get_amount0_delta, get_amount1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use dex_types::{DexError, FEE_DENOMINATOR};
use primitive_types::U256;

/// Result of a single swap step computation
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapStepResult {
    /// The sqrt price after this step
    pub sqrt_ratio_next_x96: u128,
    /// Amount of input token consumed, excluding the fee
    pub amount_in: u128,
    /// Amount of output token produced
    pub amount_out: u128,
    /// Fee amount taken from input
    pub fee_amount: u128,
}

/// Compute the result of swapping from the current price toward a target
///
/// # Arguments
/// * `sqrt_ratio_current_x96` - Current sqrt price
/// * `sqrt_ratio_target_x96` - Price the step may not pass (range bound or price limit)
/// * `liquidity` - Available liquidity
/// * `amount_remaining` - Positive = exact input, negative = exact output
/// * `fee_pips` - Fee in hundredths of a bip (e.g., 3000 = 0.3%)
pub fn compute_swap_step(
    sqrt_ratio_current_x96: u128,
    sqrt_ratio_target_x96: u128,
    liquidity: u128,
    amount_remaining: i128,
    fee_pips: u32,
) -> Result<SwapStepResult, DexError> {
    if fee_pips >= FEE_DENOMINATOR {
        return Err(DexError::InvalidFee);
    }

    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let exact_in = amount_remaining >= 0;
    let amount_remaining_abs = amount_remaining.unsigned_abs();
    let fee_complement = FEE_DENOMINATOR - fee_pips;

    let sqrt_ratio_next_x96;
    let mut amount_in = 0;
    let mut amount_out = 0;

    if exact_in {
        let amount_remaining_less_fee = to_u128(mul_div(
            U256::from(amount_remaining_abs),
            U256::from(fee_complement),
            U256::from(FEE_DENOMINATOR),
        )?)?;

        amount_in = if zero_for_one {
            get_amount0_delta(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, true)?
        } else {
            get_amount1_delta(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, true)?
        };

        sqrt_ratio_next_x96 = if amount_remaining_less_fee >= amount_in {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_input(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_less_fee,
                zero_for_one,
            )?
        };
    } else {
        amount_out = if zero_for_one {
            get_amount1_delta(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, false)?
        } else {
            get_amount0_delta(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, false)?
        };

        sqrt_ratio_next_x96 = if amount_remaining_abs >= amount_out {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_output(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_abs,
                zero_for_one,
            )?
        };
    }

    let reached_target = sqrt_ratio_next_x96 == sqrt_ratio_target_x96;

    // Recompute whichever amounts were not already computed against the final price
    if zero_for_one {
        if !(reached_target && exact_in) {
            amount_in =
                get_amount0_delta(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, true)?;
        }
        if !(reached_target && !exact_in) {
            amount_out =
                get_amount1_delta(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, false)?;
        }
    } else {
        if !(reached_target && exact_in) {
            amount_in =
                get_amount1_delta(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, true)?;
        }
        if !(reached_target && !exact_in) {
            amount_out =
                get_amount0_delta(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, false)?;
        }
    }

    // Never hand out more than requested
    if !exact_in && amount_out > amount_remaining_abs {
        amount_out = amount_remaining_abs;
    }

    let fee_amount = if exact_in && !reached_target {
        // the whole remaining input is consumed, the part not swapped is the fee
        amount_remaining_abs - amount_in
    } else {
        to_u128(mul_div_rounding_up(
            U256::from(amount_in),
            U256::from(fee_pips),
            U256::from(fee_complement),
        )?)?
    };

    Ok(SwapStepResult {
        sqrt_ratio_next_x96,
        amount_in,
        amount_out,
        fee_amount,
    })
}
