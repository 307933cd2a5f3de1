// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Pure predicates over pool state. The swap path and the registry call the
// ones that guard input; the contract tests assert the rest after every
// state transition.
//
// 1. RANGE INVARIANTS
//    - tick_lower < tick_upper, both inside the tick domain
//    - once initialized, the price stays inside the pool's range
//
// 2. SWAP INVARIANTS
//    - the limit lies strictly between the price and the range bound
//    - the price moves in the trade direction and never past the limit
//    - amounts have opposite signs
//
// 3. FEE INVARIANTS
//    - fee growth never decreases
//
// ============================================================================

use dex_types::{FeeGrowth, MAX_TICK, MIN_TICK};

// ============================================================================
// RANGE INVARIANTS
// ============================================================================

/// Invariant: the range is ordered and inside the tick domain
///
/// Property:
///   MIN_TICK <= tick_lower < tick_upper <= MAX_TICK
pub fn tick_range_valid(tick_lower: i32, tick_upper: i32) -> bool {
    tick_lower < tick_upper && tick_lower >= MIN_TICK && tick_upper <= MAX_TICK
}

/// Invariant: price lies inside the pool's range (bounds inclusive)
///
/// Property:
///   sqrt_lower <= sqrt_price_x96 <= sqrt_upper
pub fn price_within_range(sqrt_price_x96: u128, sqrt_lower: u128, sqrt_upper: u128) -> bool {
    sqrt_price_x96 >= sqrt_lower && sqrt_price_x96 <= sqrt_upper
}

// ============================================================================
// SWAP INVARIANTS
// ============================================================================

/// Invariant: price limit is reachable in the trade direction
///
/// Property:
///   - zero_for_one => sqrt_lower < limit < sqrt_price
///   - !zero_for_one => sqrt_price < limit < sqrt_upper
pub fn price_limit_valid(
    zero_for_one: bool,
    sqrt_price_x96: u128,
    sqrt_price_limit: u128,
    sqrt_lower: u128,
    sqrt_upper: u128,
) -> bool {
    if zero_for_one {
        sqrt_price_limit < sqrt_price_x96 && sqrt_price_limit > sqrt_lower
    } else {
        sqrt_price_limit > sqrt_price_x96 && sqrt_price_limit < sqrt_upper
    }
}

/// Invariant: swap direction consistency
///
/// Property:
///   - zero_for_one => price decreases (sqrt_price_after <= sqrt_price_before)
///   - !zero_for_one => price increases (sqrt_price_after >= sqrt_price_before)
pub fn swap_direction_consistent(
    zero_for_one: bool,
    sqrt_price_before: u128,
    sqrt_price_after: u128,
) -> bool {
    if zero_for_one {
        sqrt_price_after <= sqrt_price_before
    } else {
        sqrt_price_after >= sqrt_price_before
    }
}

/// Invariant: swap respects price limit
///
/// Property:
///   - zero_for_one => sqrt_price_after >= sqrt_price_limit
///   - !zero_for_one => sqrt_price_after <= sqrt_price_limit
pub fn swap_respects_limit(
    zero_for_one: bool,
    sqrt_price_after: u128,
    sqrt_price_limit: u128,
) -> bool {
    if zero_for_one {
        sqrt_price_after >= sqrt_price_limit
    } else {
        sqrt_price_after <= sqrt_price_limit
    }
}

/// Invariant: one side flows in, the other out
pub fn swap_amounts_opposite_signs(amount0: i128, amount1: i128) -> bool {
    (amount0 > 0 && amount1 < 0) || (amount0 < 0 && amount1 > 0) || (amount0 == 0 || amount1 == 0)
}

// ============================================================================
// FEE INVARIANTS
// ============================================================================

/// Invariant: fee growth global never decreases
///
/// Accumulators wrap modulo 2^256, which takes more than 2^128 tokens of fees
/// per unit of liquidity; short of that the comparison is exact.
pub fn fee_growth_monotonic(old_fee_growth: FeeGrowth, new_fee_growth: FeeGrowth) -> bool {
    new_fee_growth >= old_fee_growth
}
