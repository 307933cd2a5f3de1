#![no_std]

mod events;
mod invariants;
mod pool;
mod registry;
mod settlement;
mod storage;
mod swap;


use dex_types::{
    CreatePoolParams, DexError, Pair, PoolInfo, PoolKey, PoolState, PositionInfo, SwapParams,
    DEFAULT_FEE_TIERS, FEE_DENOMINATOR,
};
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

/// Singleton concentrated-liquidity engine.
///
/// Registry, pool state machines and token custody for every pool live in
/// this one contract; pools are addressed by the sequential id handed out by
/// `create_pool`.
#[contract]
pub struct DexPoolManager;

#[contractimpl]
impl DexPoolManager {
    /// Store the admin and enable the default fee tiers
    pub fn __constructor(env: Env, admin: Address) {
        storage::set_admin(&env, &admin);
        for fee in DEFAULT_FEE_TIERS {
            storage::enable_fee(&env, fee);
        }
        storage::set_pool_count(&env, 0);
        storage::set_pair_count(&env, 0);
    }

    // === Admin ===

    /// Enable a new fee tier (admin only)
    pub fn enable_fee_amount(env: Env, fee: u32) -> Result<(), DexError> {
        storage::get_admin(&env).require_auth();

        if fee >= FEE_DENOMINATOR {
            return Err(DexError::InvalidFee);
        }
        if storage::is_fee_enabled(&env, fee) {
            return Err(DexError::FeeAlreadyEnabled);
        }
        storage::enable_fee(&env, fee);
        Ok(())
    }

    pub fn is_fee_enabled(env: Env, fee: u32) -> bool {
        storage::is_fee_enabled(&env, fee)
    }

    pub fn admin(env: Env) -> Address {
        storage::get_admin(&env)
    }

    // === Registry ===

    /// Create a pool for a pair, range and fee tier
    ///
    /// # Returns
    /// The new pool id, or the existing id if the same key is already registered
    pub fn create_pool(
        env: Env,
        token_a: Address,
        token_b: Address,
        tick_lower: i32,
        tick_upper: i32,
        fee: u32,
    ) -> Result<u32, DexError> {
        registry::create_pool(&env, token_a, token_b, tick_lower, tick_upper, fee)
    }

    /// Get the pool id at `index` in the pair's list
    pub fn get_pool(env: Env, token_a: Address, token_b: Address, index: u32) -> Result<u32, DexError> {
        registry::get_pool(&env, token_a, token_b, index)
    }

    /// Number of pools registered for a pair
    pub fn get_pool_count(env: Env, token_a: Address, token_b: Address) -> u32 {
        registry::get_pool_count(&env, token_a, token_b)
    }

    /// Total number of pools
    pub fn pool_count(env: Env) -> u32 {
        storage::get_pool_count(&env)
    }

    /// Create and initialize a pool unless one with the same key exists
    ///
    /// An existing initialized pool is returned untouched; an existing
    /// uninitialized one is initialized with the given price.
    pub fn create_and_init_pool_if_needed(
        env: Env,
        params: CreatePoolParams,
    ) -> Result<u32, DexError> {
        let pool_id = registry::create_pool(
            &env,
            params.token0,
            params.token1,
            params.tick_lower,
            params.tick_upper,
            params.fee,
        )?;
        if !storage::get_pool_state(&env, pool_id)?.is_initialized() {
            pool::initialize(&env, pool_id, params.sqrt_price_x96)?;
        }
        Ok(pool_id)
    }

    /// Distinct pairs in insertion order
    pub fn get_pairs(env: Env) -> Vec<Pair> {
        registry::get_pairs(&env)
    }

    /// Every pool with its live state, in creation order
    pub fn get_all_pools(env: Env) -> Vec<PoolInfo> {
        registry::get_all_pools(&env)
    }

    /// Pools by id from `start`, at most 50 per call
    pub fn get_pools_paginated(env: Env, start: u32, limit: u32) -> Vec<PoolInfo> {
        registry::get_pools_paginated(&env, start, limit)
    }

    // === Pool operations ===

    /// Set the initial price of a pool
    ///
    /// # Returns
    /// The tick of the initial price
    pub fn initialize(env: Env, pool_id: u32, sqrt_price_x96: u128) -> Result<i32, DexError> {
        pool::initialize(&env, pool_id, sqrt_price_x96)
    }

    /// Add liquidity to `owner`'s position, paid by `payer`
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts deposited
    pub fn mint(
        env: Env,
        pool_id: u32,
        payer: Address,
        owner: Address,
        liquidity: u128,
    ) -> Result<(u128, u128), DexError> {
        payer.require_auth();
        pool::mint(&env, pool_id, &payer, &owner, liquidity)
    }

    /// Remove liquidity; the amounts are credited to the position, not sent
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts credited
    pub fn burn(env: Env, pool_id: u32, owner: Address, liquidity: u128) -> Result<(u128, u128), DexError> {
        owner.require_auth();
        pool::burn(&env, pool_id, &owner, liquidity)
    }

    /// Send up to the requested amounts of what the position is owed
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts sent to `recipient`
    pub fn collect(
        env: Env,
        pool_id: u32,
        owner: Address,
        recipient: Address,
        amount0_requested: u128,
        amount1_requested: u128,
    ) -> Result<(u128, u128), DexError> {
        owner.require_auth();
        pool::collect(&env, pool_id, &owner, &recipient, amount0_requested, amount1_requested)
    }

    /// Execute a swap
    ///
    /// # Arguments
    /// * `sender` - Pays the input token
    /// * `recipient` - Receives the output token
    /// * `zero_for_one` - True if swapping token0 for token1
    /// * `amount_specified` - Positive for exact input, negative for exact output
    /// * `sqrt_price_limit_x96` - Price the swap may not pass
    ///
    /// # Returns
    /// (amount0, amount1) - Positive into the pool, negative out of it
    pub fn swap(
        env: Env,
        pool_id: u32,
        sender: Address,
        recipient: Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: u128,
    ) -> Result<(i128, i128), DexError> {
        sender.require_auth();
        swap::execute_swap(
            &env,
            pool_id,
            &sender,
            &recipient,
            SwapParams {
                zero_for_one,
                amount_specified,
                sqrt_price_limit_x96,
            },
        )
    }

    // === View Functions ===

    pub fn get_pool_key(env: Env, pool_id: u32) -> Result<PoolKey, DexError> {
        storage::get_pool_key(&env, pool_id)
    }

    pub fn get_pool_state(env: Env, pool_id: u32) -> Result<PoolState, DexError> {
        storage::get_pool_state(&env, pool_id)
    }

    pub fn get_pool_info(env: Env, pool_id: u32) -> Result<PoolInfo, DexError> {
        registry::get_pool_info(&env, pool_id)
    }

    /// Position of `owner` in a pool; empty if it never minted
    pub fn get_position(env: Env, pool_id: u32, owner: Address) -> PositionInfo {
        storage::get_position(&env, pool_id, &owner)
    }

    pub fn sqrt_price_x96(env: Env, pool_id: u32) -> Result<u128, DexError> {
        Ok(storage::get_pool_state(&env, pool_id)?.sqrt_price_x96)
    }

    pub fn liquidity(env: Env, pool_id: u32) -> Result<u128, DexError> {
        Ok(storage::get_pool_state(&env, pool_id)?.liquidity)
    }
}
