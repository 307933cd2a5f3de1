use dex_types::{DexError, PositionData};
use soroban_sdk::{contracttype, Address, Env, Vec};

// ============================================================================
// SOROBAN RESOURCE LIMITS
// ============================================================================
// - Read entries per tx: 100, write entries per tx: 50
// - Owner positions use indexed storage (count + one entry per slot) instead
//   of a Vec so no single entry grows without bound
// - Removal is swap-and-pop, so burns and transfers touch a fixed number of
//   entries
// - Listing is capped at MAX_PAGE_SIZE
// ============================================================================

pub const MAX_PAGE_SIZE: u32 = 50;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool manager address (Instance storage)
    PoolManager,
    /// Next position id to hand out (Instance storage)
    NextPositionId,
    /// Live position count (Instance storage)
    TotalSupply,
    /// Position id -> PositionData (Persistent storage)
    Position(u32),
    /// Position id -> owner (Persistent storage)
    PositionOwner(u32),
    /// Owner -> number of positions held (Persistent storage)
    OwnerPositionCount(Address),
    /// (owner, slot) -> position id (Persistent storage)
    OwnerPositionAt(Address, u32),
    /// Position id -> slot in its owner's list (Persistent storage)
    PositionIndex(u32),
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn get_persistent<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
    }
    value
}

fn set_persistent<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
    value: &V,
) {
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Instance data ===

pub fn get_pool_manager(env: &Env) -> Address {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::PoolManager)
        .expect("pool manager is set by the constructor")
}

pub fn set_pool_manager(env: &Env, pool_manager: &Address) {
    env.storage().instance().set(&DataKey::PoolManager, pool_manager);
    extend_instance_ttl(env);
}

/// Hand out the next position id; ids start at 1
pub fn next_position_id(env: &Env) -> Result<u32, DexError> {
    let id: u32 = env
        .storage()
        .instance()
        .get(&DataKey::NextPositionId)
        .unwrap_or(1);
    let next = id.checked_add(1).ok_or(DexError::MathOverflow)?;
    env.storage().instance().set(&DataKey::NextPositionId, &next);
    extend_instance_ttl(env);
    Ok(id)
}

pub fn get_total_supply(env: &Env) -> u32 {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, total: u32) {
    env.storage().instance().set(&DataKey::TotalSupply, &total);
    extend_instance_ttl(env);
}

// === Positions ===

pub fn get_position(env: &Env, position_id: u32) -> Result<PositionData, DexError> {
    get_persistent(env, &DataKey::Position(position_id)).ok_or(DexError::PositionNotFound)
}

pub fn set_position(env: &Env, position_id: u32, position: &PositionData) {
    set_persistent(env, &DataKey::Position(position_id), position);
}

pub fn get_owner(env: &Env, position_id: u32) -> Result<Address, DexError> {
    get_persistent(env, &DataKey::PositionOwner(position_id)).ok_or(DexError::PositionNotFound)
}

pub fn set_owner(env: &Env, position_id: u32, owner: &Address) {
    set_persistent(env, &DataKey::PositionOwner(position_id), owner);
}

pub fn remove_position(env: &Env, position_id: u32) {
    env.storage().persistent().remove(&DataKey::Position(position_id));
    env.storage()
        .persistent()
        .remove(&DataKey::PositionOwner(position_id));
}

// === Owner index ===

pub fn get_owner_position_count(env: &Env, owner: &Address) -> u32 {
    get_persistent(env, &DataKey::OwnerPositionCount(owner.clone())).unwrap_or(0)
}

/// Append a position to the owner's indexed list
pub fn add_position_to_owner(env: &Env, owner: &Address, position_id: u32) {
    let count = get_owner_position_count(env, owner);

    set_persistent(env, &DataKey::OwnerPositionAt(owner.clone(), count), &position_id);
    set_persistent(env, &DataKey::PositionIndex(position_id), &count);
    set_persistent(env, &DataKey::OwnerPositionCount(owner.clone()), &(count + 1));
}

/// Remove a position from the owner's list, moving the last slot into the gap
pub fn remove_position_from_owner(env: &Env, owner: &Address, position_id: u32) {
    let count = get_owner_position_count(env, owner);
    if count == 0 {
        return;
    }

    let index: u32 = get_persistent(env, &DataKey::PositionIndex(position_id)).unwrap_or(0);
    let last_index = count - 1;

    if index != last_index {
        let last_position_id: u32 =
            get_persistent(env, &DataKey::OwnerPositionAt(owner.clone(), last_index)).unwrap_or(0);
        set_persistent(
            env,
            &DataKey::OwnerPositionAt(owner.clone(), index),
            &last_position_id,
        );
        set_persistent(env, &DataKey::PositionIndex(last_position_id), &index);
    }

    let storage = env.storage().persistent();
    storage.remove(&DataKey::OwnerPositionAt(owner.clone(), last_index));
    storage.remove(&DataKey::PositionIndex(position_id));
    if last_index > 0 {
        set_persistent(env, &DataKey::OwnerPositionCount(owner.clone()), &last_index);
    } else {
        storage.remove(&DataKey::OwnerPositionCount(owner.clone()));
    }
}

/// Up to MAX_PAGE_SIZE position ids of `owner`, starting at slot `start`
pub fn get_owner_positions(env: &Env, owner: &Address, start: u32, limit: u32) -> Vec<u32> {
    let count = get_owner_position_count(env, owner);
    let end = start
        .saturating_add(limit.min(MAX_PAGE_SIZE))
        .min(count);

    let mut positions = Vec::new(env);
    for i in start..end {
        if let Some(position_id) = get_persistent(env, &DataKey::OwnerPositionAt(owner.clone(), i)) {
            positions.push_back(position_id);
        }
    }
    positions
}
