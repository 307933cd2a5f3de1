use crate::FeeGrowth;
use soroban_sdk::{contracttype, Address};

/// Immutable pool configuration, fixed when the registry creates the pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolKey {
    /// Token0 address (lower address)
    pub token0: Address,
    /// Token1 address (higher address)
    pub token1: Address,
    /// Lower bound of the pool's single price range
    pub tick_lower: i32,
    /// Upper bound of the pool's single price range
    pub tick_upper: i32,
    /// Fee tier in hundredths of bps
    pub fee: u32,
}

/// Live pool state
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    /// Current sqrt(price) as Q64.96, zero until initialized
    pub sqrt_price_x96: u128,
    /// Tick of the current price
    pub tick: i32,
    /// Total liquidity provided to the range
    pub liquidity: u128,
    /// Fee growth global for token0 (Q128.128)
    pub fee_growth_global_0_x128: FeeGrowth,
    /// Fee growth global for token1 (Q128.128)
    pub fee_growth_global_1_x128: FeeGrowth,
}

impl PoolState {
    pub fn is_initialized(&self) -> bool {
        self.sqrt_price_x96 != 0
    }
}

/// Distinct asset pair seen by the registry
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pair {
    pub token0: Address,
    pub token1: Address,
}

/// Pool parameters together with a snapshot of its live state
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub pool_id: u32,
    pub token0: Address,
    pub token1: Address,
    /// Position of the pool within its pair's list
    pub index: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub fee: u32,
    pub sqrt_price_x96: u128,
    pub tick: i32,
    pub liquidity: u128,
}

/// Arguments for the idempotent create-and-initialize entry point
#[contracttype]
#[derive(Clone, Debug)]
pub struct CreatePoolParams {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub sqrt_price_x96: u128,
}

// ============================================================================
// SWAP COMPUTATION TYPES
// These types separate pure computation from side effects
// ============================================================================

/// Parameters for a swap operation (input to pure computation)
#[derive(Clone, Debug)]
pub struct SwapParams {
    /// True if swapping token0 for token1
    pub zero_for_one: bool,
    /// Positive for exact input, negative for exact output
    pub amount_specified: i128,
    /// Price limit for the swap
    pub sqrt_price_limit_x96: u128,
}

/// Complete result of pure swap computation
#[derive(Clone, Debug)]
pub struct SwapComputation {
    /// Final amount of token0 (positive = pool receives, negative = pool pays)
    pub amount0: i128,
    /// Final amount of token1 (positive = pool receives, negative = pool pays)
    pub amount1: i128,
    /// Final sqrt price after swap
    pub sqrt_price_x96: u128,
    /// Final tick after swap
    pub tick: i32,
    /// Fee taken from the input token
    pub fee_amount: u128,
    /// Updated fee growth global for input token
    pub fee_growth_global_x128: FeeGrowth,
}
