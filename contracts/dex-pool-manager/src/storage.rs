use dex_types::{DexError, Pair, PoolKey, PoolState, PositionInfo};
use soroban_sdk::{contracttype, Address, Env};

// ============================================================================
// SOROBAN RESOURCE LIMITS
// ============================================================================
// - Read entries per tx: 100, write entries per tx: 50
// - Every pool, pair and position lives in its own persistent entry, so no
//   entry grows with the number of pools
// - Enumeration reads one key + one state entry per pool, which is why
//   pagination is capped at MAX_PAGE_SIZE
// ============================================================================

/// Largest page served by `get_pools_paginated`
pub const MAX_PAGE_SIZE: u32 = 50;

/// Storage keys for the pool manager
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Admin address (Instance storage)
    Admin,
    /// Fee tier -> enabled flag (Instance storage)
    FeeEnabled(u32),
    /// Number of pools created, doubles as the next pool id (Instance storage)
    PoolCount,
    /// Number of distinct pairs seen (Instance storage)
    PairCount,
    /// Pair at insertion index (Persistent storage)
    PairAt(u32),
    /// (token0, token1) -> number of pools for the pair (Persistent storage)
    PairPoolCount(Address, Address),
    /// (token0, token1, index) -> pool id (Persistent storage)
    PairPool(Address, Address, u32),
    /// Full key -> pool id, for deduplication (Persistent storage)
    PoolByKey(PoolKey),
    /// Pool id -> immutable key (Persistent storage)
    PoolKey(u32),
    /// Pool id -> index within its pair (Persistent storage)
    PoolIndex(u32),
    /// Pool id -> live state (Persistent storage)
    PoolState(u32),
    /// (pool id, owner) -> position (Persistent storage)
    Position(u32, Address),
    /// Per-pool reentrancy flag (Temporary storage)
    Lock(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn set_persistent<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
    value: &V,
) {
    env.storage().persistent().set(key, value);
    extend_persistent_ttl(env, key);
}

// === Admin / fee tiers ===

pub fn get_admin(env: &Env) -> Address {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("admin is set by the constructor")
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    extend_instance_ttl(env);
}

pub fn is_fee_enabled(env: &Env, fee: u32) -> bool {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::FeeEnabled(fee))
        .unwrap_or(false)
}

pub fn enable_fee(env: &Env, fee: u32) {
    env.storage().instance().set(&DataKey::FeeEnabled(fee), &true);
    extend_instance_ttl(env);
}

// === Counters ===

pub fn get_pool_count(env: &Env) -> u32 {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PoolCount, &count);
    extend_instance_ttl(env);
}

pub fn get_pair_count(env: &Env) -> u32 {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::PairCount)
        .unwrap_or(0)
}

pub fn set_pair_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PairCount, &count);
    extend_instance_ttl(env);
}

// === Pairs ===

pub fn get_pair_at(env: &Env, index: u32) -> Option<Pair> {
    env.storage().persistent().get(&DataKey::PairAt(index))
}

pub fn set_pair_at(env: &Env, index: u32, pair: &Pair) {
    set_persistent(env, &DataKey::PairAt(index), pair);
}

/// `None` until the first pool of the pair is created
pub fn get_pair_pool_count(env: &Env, token0: &Address, token1: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::PairPoolCount(token0.clone(), token1.clone()))
}

pub fn set_pair_pool_count(env: &Env, token0: &Address, token1: &Address, count: u32) {
    let key = DataKey::PairPoolCount(token0.clone(), token1.clone());
    set_persistent(env, &key, &count);
}

pub fn get_pair_pool(env: &Env, token0: &Address, token1: &Address, index: u32) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::PairPool(token0.clone(), token1.clone(), index))
}

pub fn set_pair_pool(env: &Env, token0: &Address, token1: &Address, index: u32, pool_id: u32) {
    let key = DataKey::PairPool(token0.clone(), token1.clone(), index);
    set_persistent(env, &key, &pool_id);
}

// === Pools ===

pub fn find_pool_by_key(env: &Env, key: &PoolKey) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolByKey(key.clone()))
}

pub fn get_pool_key(env: &Env, pool_id: u32) -> Result<PoolKey, DexError> {
    let key = DataKey::PoolKey(pool_id);
    let pool_key = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(DexError::PoolNotFound)?;
    extend_persistent_ttl(env, &key);
    Ok(pool_key)
}

pub fn get_pool_index(env: &Env, pool_id: u32) -> Result<u32, DexError> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolIndex(pool_id))
        .ok_or(DexError::PoolNotFound)
}

pub fn get_pool_state(env: &Env, pool_id: u32) -> Result<PoolState, DexError> {
    let key = DataKey::PoolState(pool_id);
    let state = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(DexError::PoolNotFound)?;
    extend_persistent_ttl(env, &key);
    Ok(state)
}

pub fn set_pool_state(env: &Env, pool_id: u32, state: &PoolState) {
    set_persistent(env, &DataKey::PoolState(pool_id), state);
}

/// Write every record of a freshly allocated pool
pub fn add_pool(env: &Env, pool_id: u32, pool_key: &PoolKey, index: u32) {
    set_persistent(env, &DataKey::PoolKey(pool_id), pool_key);
    set_persistent(env, &DataKey::PoolByKey(pool_key.clone()), &pool_id);
    set_persistent(env, &DataKey::PoolIndex(pool_id), &index);
    set_pool_state(env, pool_id, &PoolState::default());
}

// === Positions ===

pub fn get_position(env: &Env, pool_id: u32, owner: &Address) -> PositionInfo {
    env.storage()
        .persistent()
        .get(&DataKey::Position(pool_id, owner.clone()))
        .unwrap_or_default()
}

/// Positions are kept even once empty
pub fn set_position(env: &Env, pool_id: u32, owner: &Address, info: &PositionInfo) {
    set_persistent(env, &DataKey::Position(pool_id, owner.clone()), info);
}

// === Reentrancy guard ===

/// Marks a pool as busy for as long as the guard lives
pub struct PoolLock<'a> {
    env: &'a Env,
    pool_id: u32,
}

impl<'a> PoolLock<'a> {
    pub fn acquire(env: &'a Env, pool_id: u32) -> Result<Self, DexError> {
        let key = DataKey::Lock(pool_id);
        if env.storage().temporary().has(&key) {
            return Err(DexError::Locked);
        }
        env.storage().temporary().set(&key, &true);
        Ok(Self { env, pool_id })
    }
}

impl Drop for PoolLock<'_> {
    fn drop(&mut self) {
        self.env
            .storage()
            .temporary()
            .remove(&DataKey::Lock(self.pool_id));
    }
}
