use crate::events;
use crate::invariants::{price_limit_valid, swap_respects_limit};
use crate::pool::range_sqrt_ratios;
use crate::settlement::{collect_payment, pay};
use crate::storage::{self, PoolLock};
use dex_math::{compute_swap_step, div_shift_128, get_tick_at_sqrt_ratio};
use dex_types::{DexError, PoolKey, PoolState, SwapComputation, SwapParams};
use soroban_sdk::{log, Address, Env};

fn to_signed(amount: u128) -> Result<i128, DexError> {
    i128::try_from(amount).map_err(|_| DexError::MathOverflow)
}

/// Work out a swap against `state` without touching storage or tokens
///
/// The pool has a single range, so one swap step covers the whole trade. The
/// limit must sit strictly between the current price and the range bound in
/// the trade direction; it becomes the step's target.
pub fn compute_swap(
    key: &PoolKey,
    state: &PoolState,
    params: &SwapParams,
) -> Result<SwapComputation, DexError> {
    if params.amount_specified == 0 {
        return Err(DexError::InvalidAmount);
    }
    if !state.is_initialized() {
        return Err(DexError::PoolNotInitialized);
    }
    if state.liquidity == 0 {
        return Err(DexError::InsufficientLiquidity);
    }

    let zero_for_one = params.zero_for_one;
    let sqrt_price_limit = params.sqrt_price_limit_x96;
    let (sqrt_lower, sqrt_upper) = range_sqrt_ratios(key)?;
    if !price_limit_valid(
        zero_for_one,
        state.sqrt_price_x96,
        sqrt_price_limit,
        sqrt_lower,
        sqrt_upper,
    ) {
        return Err(DexError::PriceLimitOutOfRange);
    }

    let step = compute_swap_step(
        state.sqrt_price_x96,
        sqrt_price_limit,
        state.liquidity,
        params.amount_specified,
        key.fee,
    )?;
    // The step never moves past its target, which is the limit. Checked
    // again here so the limit still holds if step targeting ever changes.
    if !swap_respects_limit(zero_for_one, step.sqrt_ratio_next_x96, sqrt_price_limit) {
        return Err(DexError::SlippageExceeded);
    }

    let fee_growth_global_x128 = if zero_for_one {
        state.fee_growth_global_0_x128
    } else {
        state.fee_growth_global_1_x128
    }
    .wrapping_add(div_shift_128(step.fee_amount, state.liquidity)?);

    let tick = get_tick_at_sqrt_ratio(step.sqrt_ratio_next_x96)?;

    let amount_in = to_signed(
        step.amount_in
            .checked_add(step.fee_amount)
            .ok_or(DexError::MathOverflow)?,
    )?;
    let amount_out = to_signed(step.amount_out)?;
    let (amount0, amount1) = if zero_for_one {
        (amount_in, -amount_out)
    } else {
        (-amount_out, amount_in)
    };

    Ok(SwapComputation {
        amount0,
        amount1,
        sqrt_price_x96: step.sqrt_ratio_next_x96,
        tick,
        fee_amount: step.fee_amount,
        fee_growth_global_x128,
    })
}

/// Compute, commit, then settle a swap
///
/// The input is pulled from `sender` and verified before any output leaves
/// the pool.
pub fn execute_swap(
    env: &Env,
    pool_id: u32,
    sender: &Address,
    recipient: &Address,
    params: SwapParams,
) -> Result<(i128, i128), DexError> {
    let _lock = PoolLock::acquire(env, pool_id)?;

    let key = storage::get_pool_key(env, pool_id)?;
    let mut state = storage::get_pool_state(env, pool_id)?;

    let result = compute_swap(&key, &state, &params).inspect_err(|err| {
        log!(
            env,
            "swap rejected",
            pool_id,
            *err as u32,
            params.amount_specified,
            params.sqrt_price_limit_x96
        );
    })?;

    state.sqrt_price_x96 = result.sqrt_price_x96;
    state.tick = result.tick;
    if params.zero_for_one {
        state.fee_growth_global_0_x128 = result.fee_growth_global_x128;
    } else {
        state.fee_growth_global_1_x128 = result.fee_growth_global_x128;
    }
    storage::set_pool_state(env, pool_id, &state);

    let (token_in, token_out, amount_in, amount_out) = if params.zero_for_one {
        (&key.token0, &key.token1, result.amount0, result.amount1)
    } else {
        (&key.token1, &key.token0, result.amount1, result.amount0)
    };
    collect_payment(env, token_in, sender, amount_in.unsigned_abs())?;
    pay(env, token_out, recipient, amount_out.unsigned_abs())?;

    events::swap(
        env,
        pool_id,
        sender,
        recipient,
        result.amount0,
        result.amount1,
        state.sqrt_price_x96,
        state.liquidity,
        state.tick,
    );
    Ok((result.amount0, result.amount1))
}
