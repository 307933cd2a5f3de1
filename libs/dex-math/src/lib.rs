//! Fixed-point price and liquidity math for single-range pools.
//!
//! Prices are Q64.96 square roots held in `u128`; products and quotients
//! go through 256/512-bit intermediates and every narrowing is checked.
#![no_std]

pub mod full_math;
pub mod liquidity_math;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

pub use full_math::*;
pub use liquidity_math::*;
pub use sqrt_price_math::*;
pub use swap_math::*;
pub use tick_math::*;
