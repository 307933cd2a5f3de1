use crate::events;
use crate::invariants::tick_range_valid;
use crate::storage::{self, MAX_PAGE_SIZE};
use dex_types::{DexError, Pair, PoolInfo, PoolKey};
use soroban_sdk::{log, Address, Env, Vec};

/// Canonical (token0, token1) ordering
pub fn sort_tokens(token_a: Address, token_b: Address) -> Result<(Address, Address), DexError> {
    if token_a == token_b {
        return Err(DexError::IdenticalTokens);
    }
    if token_a < token_b {
        Ok((token_a, token_b))
    } else {
        Ok((token_b, token_a))
    }
}

/// Allocate an uninitialized pool, or return the id already registered for
/// the same full key
pub fn create_pool(
    env: &Env,
    token_a: Address,
    token_b: Address,
    tick_lower: i32,
    tick_upper: i32,
    fee: u32,
) -> Result<u32, DexError> {
    let (token0, token1) = sort_tokens(token_a, token_b)?;

    if tick_lower >= tick_upper {
        return Err(DexError::InvalidTickRange);
    }
    if !tick_range_valid(tick_lower, tick_upper) {
        return Err(DexError::TickOutOfBounds);
    }
    if !storage::is_fee_enabled(env, fee) {
        return Err(DexError::UnsupportedFee);
    }

    let key = PoolKey {
        token0,
        token1,
        tick_lower,
        tick_upper,
        fee,
    };
    if let Some(pool_id) = storage::find_pool_by_key(env, &key) {
        return Ok(pool_id);
    }

    let pool_id = storage::get_pool_count(env);
    let next_pool_id = pool_id.checked_add(1).ok_or(DexError::MathOverflow)?;

    let index = match storage::get_pair_pool_count(env, &key.token0, &key.token1) {
        Some(count) => count,
        None => {
            // First pool for this pair
            let pair_count = storage::get_pair_count(env);
            let pair = Pair {
                token0: key.token0.clone(),
                token1: key.token1.clone(),
            };
            storage::set_pair_at(env, pair_count, &pair);
            storage::set_pair_count(env, pair_count + 1);
            0
        }
    };

    storage::add_pool(env, pool_id, &key, index);
    storage::set_pair_pool(env, &key.token0, &key.token1, index, pool_id);
    storage::set_pair_pool_count(env, &key.token0, &key.token1, index + 1);
    storage::set_pool_count(env, next_pool_id);

    log!(env, "pool created", pool_id, fee, tick_lower, tick_upper);
    events::pool_created(env, pool_id, &key, index);

    Ok(pool_id)
}

pub fn get_pool(env: &Env, token_a: Address, token_b: Address, index: u32) -> Result<u32, DexError> {
    let (token0, token1) = sort_tokens(token_a, token_b).map_err(|_| DexError::PoolNotFound)?;
    storage::get_pair_pool(env, &token0, &token1, index).ok_or(DexError::PoolNotFound)
}

pub fn get_pool_count(env: &Env, token_a: Address, token_b: Address) -> u32 {
    match sort_tokens(token_a, token_b) {
        Ok((token0, token1)) => storage::get_pair_pool_count(env, &token0, &token1).unwrap_or(0),
        Err(_) => 0,
    }
}

/// Distinct pairs in the order they were first seen
pub fn get_pairs(env: &Env) -> Vec<Pair> {
    let mut pairs = Vec::new(env);
    for i in 0..storage::get_pair_count(env) {
        if let Some(pair) = storage::get_pair_at(env, i) {
            pairs.push_back(pair);
        }
    }
    pairs
}

pub fn get_pool_info(env: &Env, pool_id: u32) -> Result<PoolInfo, DexError> {
    let key = storage::get_pool_key(env, pool_id)?;
    let state = storage::get_pool_state(env, pool_id)?;
    let index = storage::get_pool_index(env, pool_id)?;

    Ok(PoolInfo {
        pool_id,
        token0: key.token0,
        token1: key.token1,
        index,
        tick_lower: key.tick_lower,
        tick_upper: key.tick_upper,
        fee: key.fee,
        sqrt_price_x96: state.sqrt_price_x96,
        tick: state.tick,
        liquidity: state.liquidity,
    })
}

fn collect_pool_infos(env: &Env, start: u32, end: u32) -> Vec<PoolInfo> {
    let mut pools = Vec::new(env);
    for pool_id in start..end {
        if let Ok(info) = get_pool_info(env, pool_id) {
            pools.push_back(info);
        }
    }
    pools
}

/// Every pool in creation order
///
/// Reads grow with the pool count; large registries should page with
/// [`get_pools_paginated`] instead.
pub fn get_all_pools(env: &Env) -> Vec<PoolInfo> {
    collect_pool_infos(env, 0, storage::get_pool_count(env))
}

/// Returns up to `limit` pools starting at id `start`, with `limit` capped at
/// MAX_PAGE_SIZE
pub fn get_pools_paginated(env: &Env, start: u32, limit: u32) -> Vec<PoolInfo> {
    let limit = limit.min(MAX_PAGE_SIZE);
    let end = start.saturating_add(limit).min(storage::get_pool_count(env));
    collect_pool_infos(env, start, end)
}
