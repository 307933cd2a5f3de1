use soroban_sdk::contracttype;

/// Unsigned 256-bit fee-growth accumulator (Q128.128)
///
/// Fees per unit of liquidity can exceed 2^128 when a pool's fee income is
/// large relative to its liquidity, so the accumulator is split into two
/// 128-bit words. Arithmetic wraps modulo 2^256; consumers only ever look at
/// the difference between two snapshots.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct FeeGrowth {
    /// High 128 bits
    pub hi: u128,
    /// Low 128 bits
    pub lo: u128,
}

impl FeeGrowth {
    pub const ZERO: FeeGrowth = FeeGrowth { hi: 0, lo: 0 };

    pub const fn new(hi: u128, lo: u128) -> Self {
        Self { hi, lo }
    }

    pub fn wrapping_add(self, other: FeeGrowth) -> FeeGrowth {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        let hi = self.hi.wrapping_add(other.hi).wrapping_add(carry as u128);
        FeeGrowth { hi, lo }
    }

    pub fn wrapping_sub(self, other: FeeGrowth) -> FeeGrowth {
        let (lo, borrow) = self.lo.overflowing_sub(other.lo);
        let hi = self.hi.wrapping_sub(other.hi).wrapping_sub(borrow as u128);
        FeeGrowth { hi, lo }
    }
}

impl From<u128> for FeeGrowth {
    fn from(lo: u128) -> Self {
        FeeGrowth { hi: 0, lo }
    }
}
