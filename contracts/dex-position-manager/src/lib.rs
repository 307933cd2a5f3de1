#![no_std]

mod pool_calls;
mod storage;


use dex_math::{get_liquidity_for_amounts, get_sqrt_ratio_at_tick, mul_shift_128};
use dex_types::{DexError, PoolKey, PoolState, PositionData};
use soroban_sdk::{contract, contractimpl, contracttype, log, Address, Env, Symbol, Vec};

/// Issues transferable position ids on top of the pool manager.
///
/// The pool manager sees a single owner (this contract) per pool; the split
/// between individual positions, including fees, is tracked here.
#[contract]
pub struct DexPositionManager;

/// Mint parameters
#[contracttype]
#[derive(Clone, Debug)]
pub struct MintParams {
    pub token0: Address,
    pub token1: Address,
    /// Index of the pool in the pair's list
    pub index: u32,
    pub amount0_desired: u128,
    pub amount1_desired: u128,
    pub amount0_min: u128,
    pub amount1_min: u128,
    /// Owner of the new position; authorizes and pays
    pub recipient: Address,
    pub deadline: u64,
}

/// Increase liquidity parameters
#[contracttype]
#[derive(Clone, Debug)]
pub struct IncreaseLiquidityParams {
    pub position_id: u32,
    pub amount0_desired: u128,
    pub amount1_desired: u128,
    pub amount0_min: u128,
    pub amount1_min: u128,
    pub deadline: u64,
}

/// Decrease liquidity parameters
#[contracttype]
#[derive(Clone, Debug)]
pub struct DecreaseLiquidityParams {
    pub position_id: u32,
    pub liquidity: u128,
    pub amount0_min: u128,
    pub amount1_min: u128,
    pub deadline: u64,
}

/// Collect parameters
#[contracttype]
#[derive(Clone, Debug)]
pub struct CollectParams {
    pub position_id: u32,
    pub recipient: Address,
    pub amount0_max: u128,
    pub amount1_max: u128,
}

#[contractimpl]
impl DexPositionManager {
    pub fn __constructor(env: Env, pool_manager: Address) {
        storage::set_pool_manager(&env, &pool_manager);
        storage::set_total_supply(&env, 0);
    }

    /// Open a new position in an existing pool
    ///
    /// # Returns
    /// (position_id, liquidity, amount0, amount1)
    pub fn mint(env: Env, params: MintParams) -> Result<(u32, u128, u128, u128), DexError> {
        params.recipient.require_auth();
        check_deadline(&env, params.deadline)?;

        let pool_manager = storage::get_pool_manager(&env);
        let pool_id = pool_calls::get_pool(
            &env,
            &pool_manager,
            &params.token0,
            &params.token1,
            params.index,
        );
        let key = pool_calls::get_pool_key(&env, &pool_manager, pool_id);
        let state = pool_calls::get_pool_state(&env, &pool_manager, pool_id);

        let liquidity = liquidity_for_amounts(
            &key,
            &state,
            params.amount0_desired,
            params.amount1_desired,
        )?;
        let (amount0, amount1) =
            pool_calls::mint(&env, &pool_manager, pool_id, &params.recipient, liquidity);
        check_slippage(amount0, amount1, params.amount0_min, params.amount1_min)?;

        let position_id = storage::next_position_id(&env)?;
        let position = PositionData {
            pool_id,
            liquidity,
            fee_growth_inside_0_last_x128: state.fee_growth_global_0_x128,
            fee_growth_inside_1_last_x128: state.fee_growth_global_1_x128,
            tokens_owed_0: 0,
            tokens_owed_1: 0,
        };
        storage::set_position(&env, position_id, &position);
        storage::set_owner(&env, position_id, &params.recipient);
        storage::add_position_to_owner(&env, &params.recipient, position_id);
        storage::set_total_supply(&env, storage::get_total_supply(&env) + 1);

        env.events().publish(
            (Symbol::new(&env, "position_minted"),),
            (position_id, params.recipient, pool_id, liquidity),
        );

        Ok((position_id, liquidity, amount0, amount1))
    }

    /// Add liquidity to an existing position, paid by its owner
    ///
    /// # Returns
    /// (liquidity added, amount0, amount1)
    pub fn increase_liquidity(
        env: Env,
        params: IncreaseLiquidityParams,
    ) -> Result<(u128, u128, u128), DexError> {
        check_deadline(&env, params.deadline)?;

        let owner = storage::get_owner(&env, params.position_id)?;
        owner.require_auth();

        let mut position = storage::get_position(&env, params.position_id)?;
        let pool_manager = storage::get_pool_manager(&env);
        let key = pool_calls::get_pool_key(&env, &pool_manager, position.pool_id);
        let state = pool_calls::get_pool_state(&env, &pool_manager, position.pool_id);

        let liquidity = liquidity_for_amounts(
            &key,
            &state,
            params.amount0_desired,
            params.amount1_desired,
        )?;
        let (amount0, amount1) =
            pool_calls::mint(&env, &pool_manager, position.pool_id, &owner, liquidity);
        check_slippage(amount0, amount1, params.amount0_min, params.amount1_min)?;

        accrue_fees(&mut position, &state)?;
        position.liquidity = position
            .liquidity
            .checked_add(liquidity)
            .ok_or(DexError::MathOverflow)?;
        storage::set_position(&env, params.position_id, &position);

        Ok((liquidity, amount0, amount1))
    }

    /// Remove liquidity; the amounts are credited to the position
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts credited
    pub fn decrease_liquidity(
        env: Env,
        params: DecreaseLiquidityParams,
    ) -> Result<(u128, u128), DexError> {
        check_deadline(&env, params.deadline)?;

        let owner = storage::get_owner(&env, params.position_id)?;
        owner.require_auth();

        let mut position = storage::get_position(&env, params.position_id)?;
        if params.liquidity == 0 {
            return Err(DexError::ZeroLiquidity);
        }
        if params.liquidity > position.liquidity {
            return Err(DexError::InsufficientPositionLiquidity);
        }

        let pool_manager = storage::get_pool_manager(&env);
        let (amount0, amount1) =
            pool_calls::burn(&env, &pool_manager, position.pool_id, params.liquidity);
        check_slippage(amount0, amount1, params.amount0_min, params.amount1_min)?;

        let state = pool_calls::get_pool_state(&env, &pool_manager, position.pool_id);
        accrue_fees(&mut position, &state)?;
        position.liquidity -= params.liquidity;
        position.tokens_owed_0 = position
            .tokens_owed_0
            .checked_add(amount0)
            .ok_or(DexError::MathOverflow)?;
        position.tokens_owed_1 = position
            .tokens_owed_1
            .checked_add(amount1)
            .ok_or(DexError::MathOverflow)?;
        storage::set_position(&env, params.position_id, &position);

        Ok((amount0, amount1))
    }

    /// Pay out principal and fees owed to a position
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts sent to the recipient
    pub fn collect(env: Env, params: CollectParams) -> Result<(u128, u128), DexError> {
        let owner = storage::get_owner(&env, params.position_id)?;
        owner.require_auth();

        let mut position = storage::get_position(&env, params.position_id)?;
        let pool_manager = storage::get_pool_manager(&env);

        if position.liquidity > 0 {
            // zero burn settles pool-level fees before they are split
            pool_calls::burn(&env, &pool_manager, position.pool_id, 0);
            let state = pool_calls::get_pool_state(&env, &pool_manager, position.pool_id);
            accrue_fees(&mut position, &state)?;
        }

        let amount0 = params.amount0_max.min(position.tokens_owed_0);
        let amount1 = params.amount1_max.min(position.tokens_owed_1);
        if amount0 == 0 && amount1 == 0 {
            storage::set_position(&env, params.position_id, &position);
            return Ok((0, 0));
        }

        // The pool may hold less than the per-position share; only what it
        // pays out leaves the owed balances
        let (collected0, collected1) = pool_calls::collect(
            &env,
            &pool_manager,
            position.pool_id,
            &params.recipient,
            amount0,
            amount1,
        );
        position.tokens_owed_0 -= collected0.min(amount0);
        position.tokens_owed_1 -= collected1.min(amount1);
        storage::set_position(&env, params.position_id, &position);
        log!(&env, "position collected", params.position_id, collected0, collected1);

        Ok((collected0, collected1))
    }

    /// Destroy an empty position
    pub fn burn(env: Env, position_id: u32) -> Result<(), DexError> {
        let owner = storage::get_owner(&env, position_id)?;
        owner.require_auth();

        let position = storage::get_position(&env, position_id)?;
        if position.liquidity != 0 || position.tokens_owed_0 != 0 || position.tokens_owed_1 != 0 {
            return Err(DexError::PositionNotEmpty);
        }

        storage::remove_position(&env, position_id);
        storage::remove_position_from_owner(&env, &owner, position_id);
        storage::set_total_supply(&env, storage::get_total_supply(&env).saturating_sub(1));

        env.events().publish(
            (Symbol::new(&env, "position_burned"),),
            (position_id,),
        );
        Ok(())
    }

    /// Move a position to a new owner
    pub fn transfer(env: Env, from: Address, to: Address, position_id: u32) -> Result<(), DexError> {
        from.require_auth();

        let owner = storage::get_owner(&env, position_id)?;
        if owner != from {
            return Err(DexError::NotPositionOwner);
        }

        storage::set_owner(&env, position_id, &to);
        storage::remove_position_from_owner(&env, &from, position_id);
        storage::add_position_to_owner(&env, &to, position_id);

        env.events().publish(
            (Symbol::new(&env, "transfer"),),
            (from, to, position_id),
        );
        Ok(())
    }

    // === View Functions ===

    pub fn get_position(env: Env, position_id: u32) -> Result<PositionData, DexError> {
        storage::get_position(&env, position_id)
    }

    pub fn owner_of(env: Env, position_id: u32) -> Result<Address, DexError> {
        storage::get_owner(&env, position_id)
    }

    /// Number of positions held by `owner`
    pub fn balance_of(env: Env, owner: Address) -> u32 {
        storage::get_owner_position_count(&env, &owner)
    }

    /// First 50 position ids held by `owner`
    pub fn positions_of(env: Env, owner: Address) -> Vec<u32> {
        storage::get_owner_positions(&env, &owner, 0, storage::MAX_PAGE_SIZE)
    }

    /// Position ids held by `owner` from slot `start`, at most 50 per call
    pub fn positions_of_paginated(env: Env, owner: Address, start: u32, limit: u32) -> Vec<u32> {
        storage::get_owner_positions(&env, &owner, start, limit)
    }

    /// Number of live positions
    pub fn total_supply(env: Env) -> u32 {
        storage::get_total_supply(&env)
    }

    pub fn pool_manager(env: Env) -> Address {
        storage::get_pool_manager(&env)
    }
}

// === Helper Functions ===

fn check_deadline(env: &Env, deadline: u64) -> Result<(), DexError> {
    if env.ledger().timestamp() > deadline {
        return Err(DexError::DeadlineExpired);
    }
    Ok(())
}

fn check_slippage(amount0: u128, amount1: u128, amount0_min: u128, amount1_min: u128) -> Result<(), DexError> {
    if amount0 < amount0_min || amount1 < amount1_min {
        return Err(DexError::SlippageExceeded);
    }
    Ok(())
}

/// Largest liquidity the desired amounts can back at the current price
fn liquidity_for_amounts(
    key: &PoolKey,
    state: &PoolState,
    amount0_desired: u128,
    amount1_desired: u128,
) -> Result<u128, DexError> {
    if !state.is_initialized() {
        return Err(DexError::PoolNotInitialized);
    }
    let liquidity = get_liquidity_for_amounts(
        state.sqrt_price_x96,
        get_sqrt_ratio_at_tick(key.tick_lower)?,
        get_sqrt_ratio_at_tick(key.tick_upper)?,
        amount0_desired,
        amount1_desired,
    )?;
    if liquidity == 0 {
        return Err(DexError::ZeroLiquidity);
    }
    Ok(liquidity)
}

/// Credit the position's share of fee growth since its last snapshot
fn accrue_fees(position: &mut PositionData, state: &PoolState) -> Result<(), DexError> {
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
