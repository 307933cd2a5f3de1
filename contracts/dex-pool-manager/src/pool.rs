use crate::events;
use crate::settlement::{collect_payment, pay};
use crate::storage::{self, PoolLock};
use dex_math::{
    add_delta, get_amount0_delta, get_amount1_delta, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio, mul_shift_128,
};
use dex_types::{DexError, PoolKey, PoolState, PositionInfo};
use soroban_sdk::{log, Address, Env};

/// sqrt prices of the pool's range bounds
pub fn range_sqrt_ratios(key: &PoolKey) -> Result<(u128, u128), DexError> {
    Ok((
        get_sqrt_ratio_at_tick(key.tick_lower)?,
        get_sqrt_ratio_at_tick(key.tick_upper)?,
    ))
}

fn liquidity_delta(liquidity: u128) -> Result<i128, DexError> {
    i128::try_from(liquidity).map_err(|_| DexError::MathOverflow)
}

/// Credit fees earned since the last snapshot and move the snapshot to now
fn accrue_fees(position: &mut PositionInfo, state: &PoolState) -> Result<(), DexError> {
    let owed0 = mul_shift_128(
        state
            .fee_growth_global_0_x128
            .wrapping_sub(position.fee_growth_inside_0_last_x128),
        position.liquidity,
    )?;
    let owed1 = mul_shift_128(
        state
            .fee_growth_global_1_x128
            .wrapping_sub(position.fee_growth_inside_1_last_x128),
        position.liquidity,
    )?;

    position.tokens_owed_0 = position
        .tokens_owed_0
        .checked_add(owed0)
        .ok_or(DexError::MathOverflow)?;
    position.tokens_owed_1 = position
        .tokens_owed_1
        .checked_add(owed1)
        .ok_or(DexError::MathOverflow)?;
    position.fee_growth_inside_0_last_x128 = state.fee_growth_global_0_x128;
    position.fee_growth_inside_1_last_x128 = state.fee_growth_global_1_x128;
    Ok(())
}

/// Set the starting price; only once, and strictly inside the range
pub fn initialize(env: &Env, pool_id: u32, sqrt_price_x96: u128) -> Result<i32, DexError> {
    let _lock = PoolLock::acquire(env, pool_id)?;

    let key = storage::get_pool_key(env, pool_id)?;
    let mut state = storage::get_pool_state(env, pool_id)?;
    if state.is_initialized() {
        return Err(DexError::PoolAlreadyInitialized);
    }

    let (sqrt_lower, sqrt_upper) = range_sqrt_ratios(&key)?;
    if sqrt_price_x96 <= sqrt_lower || sqrt_price_x96 >= sqrt_upper {
        log!(env, "initial price outside range", pool_id, sqrt_price_x96);
        return Err(DexError::InvalidInitialPrice);
    }

    let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
    state.sqrt_price_x96 = sqrt_price_x96;
    state.tick = tick;
    storage::set_pool_state(env, pool_id, &state);

    log!(env, "pool initialized", pool_id, sqrt_price_x96, tick);
    events::initialize(env, pool_id, sqrt_price_x96, tick);
    Ok(tick)
}

/// Add liquidity for `owner`, paid by `payer`
///
/// Amounts round up, so the pool is never short of what a later burn returns.
pub fn mint(
    env: &Env,
    pool_id: u32,
    payer: &Address,
    owner: &Address,
    liquidity: u128,
) -> Result<(u128, u128), DexError> {
    let _lock = PoolLock::acquire(env, pool_id)?;

    let key = storage::get_pool_key(env, pool_id)?;
    let mut state = storage::get_pool_state(env, pool_id)?;
    if !state.is_initialized() {
        return Err(DexError::PoolNotInitialized);
    }
    if liquidity == 0 {
        return Err(DexError::ZeroLiquidity);
    }
    let delta = liquidity_delta(liquidity)?;

    let (sqrt_lower, sqrt_upper) = range_sqrt_ratios(&key)?;
    let amount0 = get_amount0_delta(state.sqrt_price_x96, sqrt_upper, liquidity, true)?;
    let amount1 = get_amount1_delta(sqrt_lower, state.sqrt_price_x96, liquidity, true)?;

    let mut position = storage::get_position(env, pool_id, owner);
    accrue_fees(&mut position, &state)?;
    position.liquidity = add_delta(position.liquidity, delta)?;
    state.liquidity = add_delta(state.liquidity, delta)?;

    storage::set_position(env, pool_id, owner, &position);
    storage::set_pool_state(env, pool_id, &state);

    collect_payment(env, &key.token0, payer, amount0)?;
    collect_payment(env, &key.token1, payer, amount1)?;

    events::mint(env, pool_id, owner, liquidity, amount0, amount1);
    Ok((amount0, amount1))
}

/// Remove liquidity and credit principal to the owner's owed balances
///
/// Nothing is transferred here; `collect` pays out. A zero burn only accrues
/// fees.
pub fn burn(env: &Env, pool_id: u32, owner: &Address, liquidity: u128) -> Result<(u128, u128), DexError> {
    let _lock = PoolLock::acquire(env, pool_id)?;

    let key = storage::get_pool_key(env, pool_id)?;
    let mut state = storage::get_pool_state(env, pool_id)?;
    if !state.is_initialized() {
        return Err(DexError::PoolNotInitialized);
    }

    let mut position = storage::get_position(env, pool_id, owner);
    if position.liquidity < liquidity {
        return Err(DexError::InsufficientPositionLiquidity);
    }
    let delta = liquidity_delta(liquidity)?;

    let (sqrt_lower, sqrt_upper) = range_sqrt_ratios(&key)?;
    let amount0 = get_amount0_delta(state.sqrt_price_x96, sqrt_upper, liquidity, false)?;
    let amount1 = get_amount1_delta(sqrt_lower, state.sqrt_price_x96, liquidity, false)?;

    accrue_fees(&mut position, &state)?;
    position.liquidity = add_delta(position.liquidity, -delta)?;
    state.liquidity = add_delta(state.liquidity, -delta)?;
    position.tokens_owed_0 = position
        .tokens_owed_0
        .checked_add(amount0)
        .ok_or(DexError::MathOverflow)?;
    position.tokens_owed_1 = position
        .tokens_owed_1
        .checked_add(amount1)
        .ok_or(DexError::MathOverflow)?;

    storage::set_position(env, pool_id, owner, &position);
    storage::set_pool_state(env, pool_id, &state);

    events::burn(env, pool_id, owner, liquidity, amount0, amount1);
    Ok((amount0, amount1))
}

/// Pay out up to the requested amounts of what the position is owed
pub fn collect(
    env: &Env,
    pool_id: u32,
    owner: &Address,
    recipient: &Address,
    amount0_requested: u128,
    amount1_requested: u128,
) -> Result<(u128, u128), DexError> {
    let _lock = PoolLock::acquire(env, pool_id)?;

    let key = storage::get_pool_key(env, pool_id)?;
    let mut position = storage::get_position(env, pool_id, owner);

    let amount0 = amount0_requested.min(position.tokens_owed_0);
    let amount1 = amount1_requested.min(position.tokens_owed_1);

    if amount0 > 0 || amount1 > 0 {
        position.tokens_owed_0 -= amount0;
        position.tokens_owed_1 -= amount1;
        storage::set_position(env, pool_id, owner, &position);

        pay(env, &key.token0, recipient, amount0)?;
        pay(env, &key.token1, recipient, amount1)?;
    }

    events::collect(env, pool_id, owner, recipient, amount0, amount1);
    Ok((amount0, amount1))
}
