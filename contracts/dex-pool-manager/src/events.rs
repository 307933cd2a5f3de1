use dex_types::PoolKey;
use soroban_sdk::{Address, Env, Symbol};

pub fn pool_created(env: &Env, pool_id: u32, key: &PoolKey, index: u32) {
    env.events().publish(
        (Symbol::new(env, "pool_created"),),
        (
            pool_id,
            key.token0.clone(),
            key.token1.clone(),
            key.tick_lower,
            key.tick_upper,
            key.fee,
            index,
        ),
    );
}

pub fn initialize(env: &Env, pool_id: u32, sqrt_price_x96: u128, tick: i32) {
    env.events().publish(
        (Symbol::new(env, "initialize"), pool_id),
        (sqrt_price_x96, tick),
    );
}

pub fn mint(env: &Env, pool_id: u32, owner: &Address, liquidity: u128, amount0: u128, amount1: u128) {
    env.events().publish(
        (Symbol::new(env, "mint"), pool_id),
        (owner.clone(), liquidity, amount0, amount1),
    );
}

pub fn burn(env: &Env, pool_id: u32, owner: &Address, liquidity: u128, amount0: u128, amount1: u128) {
    env.events().publish(
        (Symbol::new(env, "burn"), pool_id),
        (owner.clone(), liquidity, amount0, amount1),
    );
}

pub fn collect(
    env: &Env,
    pool_id: u32,
    owner: &Address,
    recipient: &Address,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (Symbol::new(env, "collect"), pool_id),
        (owner.clone(), recipient.clone(), amount0, amount1),
    );
}

/// Signed amounts: positive went into the pool, negative came out
#[allow(clippy::too_many_arguments)]
pub fn swap(
    env: &Env,
    pool_id: u32,
    sender: &Address,
    recipient: &Address,
    amount0: i128,
    amount1: i128,
    sqrt_price_x96: u128,
    liquidity: u128,
    tick: i32,
) {
    env.events().publish(
        (Symbol::new(env, "swap"), pool_id),
        (
            sender.clone(),
            recipient.clone(),
            amount0,
            amount1,
            sqrt_price_x96,
            liquidity,
            tick,
        ),
    );
}
