use crate::FeeGrowth;
use soroban_sdk::contracttype;

/// Position info stored per (pool, owner) in the pool manager
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PositionInfo {
    /// Liquidity in this position
    pub liquidity: u128,
    /// Fee growth at last update (token0)
    pub fee_growth_inside_0_last_x128: FeeGrowth,
    /// Fee growth at last update (token1)
    pub fee_growth_inside_1_last_x128: FeeGrowth,
    /// Uncollected token0 (burned principal plus fees)
    pub tokens_owed_0: u128,
    /// Uncollected token1 (burned principal plus fees)
    pub tokens_owed_1: u128,
}

/// Position data kept by the position manager for each issued id
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionData {
    /// Pool the position lives in
    pub pool_id: u32,
    /// Liquidity amount
    pub liquidity: u128,
    /// Fee growth at last action (token0)
    pub fee_growth_inside_0_last_x128: FeeGrowth,
    /// Fee growth at last action (token1)
    pub fee_growth_inside_1_last_x128: FeeGrowth,
    /// Tokens owed (token0)
    pub tokens_owed_0: u128,
    /// Tokens owed (token1)
    pub tokens_owed_1: u128,
}
