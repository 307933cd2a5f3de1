use dex_types::{DexError, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use primitive_types::U256;

use crate::full_math::to_u128;

/// sqrt(1.0001^-(2^i)) in Q128, for bits 1 through 18 of the absolute tick
const SQRT_RATIO_FACTORS: [u128; 18] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
];

/// Calculate sqrt(1.0001^tick) * 2^96
///
/// The Q128.128 intermediate is converted to Q64.96 rounding up, so the tick
/// recovered by [`get_tick_at_sqrt_ratio`] is always the input tick.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<u128, DexError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(DexError::TickOutOfBounds);
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(0xfffcb933bd6fad37aa2d162d1a594001u128)
    } else {
        U256::one() << 128u32
    };

    // ratio stays <= 2^128 and every factor is < 2^128, so the product fits
    for (bit, factor) in SQRT_RATIO_FACTORS.iter().enumerate() {
        if abs_tick & (0x2 << bit) != 0 {
            ratio = (ratio * U256::from(*factor)) >> 128u32;
        }
    }

    // Invert for positive ticks (the factors describe negative ones)
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    let rounding = if ratio.low_u32() == 0 {
        U256::zero()
    } else {
        U256::one()
    };
    to_u128((ratio >> 32u32) + rounding)
}

/// Get the greatest tick whose sqrt ratio is <= `sqrt_price_x96`
///
/// Accepts `MIN_SQRT_RATIO..MAX_SQRT_RATIO`. The upper bound is exclusive, so
/// the price of `MAX_TICK` itself is rejected and `MAX_TICK - 1` is the
/// highest tick returned.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: u128) -> Result<i32, DexError> {
    if !(MIN_SQRT_RATIO..MAX_SQRT_RATIO).contains(&sqrt_price_x96) {
        return Err(DexError::SqrtPriceOutOfBounds);
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use dex_types::Q96;

    // === get_sqrt_ratio_at_tick tests ===

    #[test]
    fn test_get_sqrt_ratio_at_tick_zero() {
        assert_eq!(get_sqrt_ratio_at_tick(0), Ok(Q96));
    }

    #[test]
    fn test_get_sqrt_ratio_at_tick_known_values() {
        assert_eq!(get_sqrt_ratio_at_tick(1), Ok(79232123823359799118286999568));
        assert_eq!(get_sqrt_ratio_at_tick(-1), Ok(79224201403219477170569942574));
        assert_eq!(get_sqrt_ratio_at_tick(60), Ok(79466191966197645195421774833));
        assert_eq!(get_sqrt_ratio_at_tick(100), Ok(79625275426524748796330556128));
        assert_eq!(get_sqrt_ratio_at_tick(-100), Ok(78833030112140176575862854579));
        // price 100, 5000, 10000 and 40000
        assert_eq!(get_sqrt_ratio_at_tick(46054), Ok(792281450588003167884250659085));
        assert_eq!(get_sqrt_ratio_at_tick(85176), Ok(5602223755577321903022134995689));
        assert_eq!(get_sqrt_ratio_at_tick(92108), Ok(7922812760334014175246846344927));
        assert_eq!(get_sqrt_ratio_at_tick(105971), Ok(15845121071331206530120432648072));
    }

    #[test]
    fn test_tick_bounds() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK), Ok(MIN_SQRT_RATIO));
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK), Ok(MAX_SQRT_RATIO));
    }

    #[test]
    fn test_get_sqrt_ratio_outside_tick_domain() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK - 1), Err(DexError::TickOutOfBounds));
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK + 1), Err(DexError::TickOutOfBounds));
    }

    #[test]
    fn test_get_sqrt_ratio_at_tick_monotonic() {
        let mut prev_sqrt = get_sqrt_ratio_at_tick(-10000).unwrap();
        for tick in (-9999..=10000).step_by(100) {
            let sqrt = get_sqrt_ratio_at_tick(tick).unwrap();
            assert!(sqrt > prev_sqrt, "sqrt_price should be monotonically increasing");
            prev_sqrt = sqrt;
        }
    }

    // === get_tick_at_sqrt_ratio tests ===

    #[test]
    fn test_get_tick_at_sqrt_ratio_q96() {
        assert_eq!(get_tick_at_sqrt_ratio(Q96), Ok(0));
        // floor: anything below 2^96 belongs to tick -1
        assert_eq!(get_tick_at_sqrt_ratio(Q96 - 1), Ok(-1));
    }

    #[test]
    fn test_get_tick_at_encoded_prices() {
        // encodeSqrtRatioX96(n, 1) for n = 1, 100, 5000, 10000, 40000
        assert_eq!(get_tick_at_sqrt_ratio(79228162514264337593543950336), Ok(0));
        assert_eq!(get_tick_at_sqrt_ratio(792281625142643375935439503360), Ok(46054));
        assert_eq!(get_tick_at_sqrt_ratio(5602277097478613991873193822745), Ok(85176));
        assert_eq!(get_tick_at_sqrt_ratio(7922816251426433759354395033600), Ok(92108));
        assert_eq!(get_tick_at_sqrt_ratio(15845632502852867518708790067200), Ok(105971));
    }

    #[test]
    fn test_get_tick_at_sqrt_ratio_roundtrip() {
        let mut ticks: std::vec::Vec<i32> = (MIN_TICK..MAX_TICK).step_by(997).collect();
        ticks.extend([-1, 0, 1, MAX_TICK - 1]);

        for tick in ticks {
            let sqrt_price = get_sqrt_ratio_at_tick(tick).unwrap();
            assert_eq!(get_tick_at_sqrt_ratio(sqrt_price), Ok(tick));
            if tick > MIN_TICK {
                assert_eq!(get_tick_at_sqrt_ratio(sqrt_price - 1), Ok(tick - 1));
            }
        }
    }

    #[test]
    fn test_get_tick_at_sqrt_ratio_excludes_max_tick_price() {
        let sqrt_price = get_sqrt_ratio_at_tick(MAX_TICK).unwrap();
        assert_eq!(sqrt_price, MAX_SQRT_RATIO);
        assert_eq!(
            get_tick_at_sqrt_ratio(sqrt_price),
            Err(DexError::SqrtPriceOutOfBounds)
        );
        assert_eq!(get_tick_at_sqrt_ratio(sqrt_price - 1), Ok(MAX_TICK - 1));
    }

    #[test]
    fn test_get_tick_at_sqrt_ratio_edges() {
        assert_eq!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO), Ok(MIN_TICK));
        assert_eq!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO + 1), Ok(MIN_TICK));
        assert_eq!(get_tick_at_sqrt_ratio(MAX_SQRT_RATIO - 1), Ok(MAX_TICK - 1));
    }

    #[test]
    fn test_get_tick_at_sqrt_ratio_out_of_bounds() {
        assert_eq!(
            get_tick_at_sqrt_ratio(MIN_SQRT_RATIO - 1),
            Err(DexError::SqrtPriceOutOfBounds)
        );
        // MAX_SQRT_RATIO is exclusive
        assert_eq!(
            get_tick_at_sqrt_ratio(MAX_SQRT_RATIO),
            Err(DexError::SqrtPriceOutOfBounds)
        );
    }
}
