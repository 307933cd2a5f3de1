//! Cross-contract calls into the pool manager.
//!
//! A pool-level error aborts the whole invocation with the pool manager's
//! error code, so callers never see a partially applied operation.

use dex_types::{PoolKey, PoolState};
use soroban_sdk::{Address, Env, IntoVal, Symbol};

pub fn get_pool(env: &Env, pool_manager: &Address, token0: &Address, token1: &Address, index: u32) -> u32 {
    env.invoke_contract(
        pool_manager,
        &Symbol::new(env, "get_pool"),
        (token0.clone(), token1.clone(), index).into_val(env),
    )
}

pub fn get_pool_key(env: &Env, pool_manager: &Address, pool_id: u32) -> PoolKey {
    env.invoke_contract(
        pool_manager,
        &Symbol::new(env, "get_pool_key"),
        (pool_id,).into_val(env),
    )
}

pub fn get_pool_state(env: &Env, pool_manager: &Address, pool_id: u32) -> PoolState {
    env.invoke_contract(
        pool_manager,
        &Symbol::new(env, "get_pool_state"),
        (pool_id,).into_val(env),
    )
}

/// Add liquidity under this contract's pool-level position
pub fn mint(
    env: &Env,
    pool_manager: &Address,
    pool_id: u32,
    payer: &Address,
    liquidity: u128,
) -> (u128, u128) {
    env.invoke_contract(
        pool_manager,
        &Symbol::new(env, "mint"),
        (pool_id, payer.clone(), env.current_contract_address(), liquidity).into_val(env),
    )
}

pub fn burn(env: &Env, pool_manager: &Address, pool_id: u32, liquidity: u128) -> (u128, u128) {
    env.invoke_contract(
        pool_manager,
        &Symbol::new(env, "burn"),
        (pool_id, env.current_contract_address(), liquidity).into_val(env),
    )
}

pub fn collect(
    env: &Env,
    pool_manager: &Address,
    pool_id: u32,
    recipient: &Address,
    amount0_requested: u128,
    amount1_requested: u128,
) -> (u128, u128) {
    env.invoke_contract(
        pool_manager,
        &Symbol::new(env, "collect"),
        (
            pool_id,
            env.current_contract_address(),
            recipient.clone(),
            amount0_requested,
            amount1_requested,
        )
            .into_val(env),
    )
}
