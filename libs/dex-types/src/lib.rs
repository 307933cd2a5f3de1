#![no_std]

mod error;
mod fee_growth;
mod pool;
mod position;

pub use error::*;
pub use fee_growth::*;
pub use pool::*;
pub use position::*;

/// Q96 constant (2^96) for fixed-point math
pub const Q96: u128 = 1 << 96;

/// Minimum tick index
/// Limited by u128 representation (originally -887272 for uint160)
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
/// Limited by u128 representation (originally 887272 for uint160)
pub const MAX_TICK: i32 = 443636;

/// Minimum sqrt price (at MIN_TICK)
/// sqrt(1.0001^-443636) * 2^96
pub const MIN_SQRT_RATIO: u128 = 18447090764788882728;

/// Maximum sqrt price (at MAX_TICK)
/// sqrt(1.0001^443636) * 2^96, bounded by u128::MAX
pub const MAX_SQRT_RATIO: u128 = 340275971719517849884101479065584693834;

/// Fee amount in hundredths of a basis point (1e-6)
/// 500 = 0.05%, 3000 = 0.3%, 10000 = 1%
pub type Fee = u32;

/// Denominator for fee pips
pub const FEE_DENOMINATOR: u32 = 1_000_000;

/// Fee tiers enabled when the pool manager is deployed
pub const DEFAULT_FEE_TIERS: [Fee; 3] = [500, 3000, 10000];
