//! Array-backed engine. Reference semantics for the intrinsic backends and
//! the fallback on targets without one.

use super::{LaneEngine, Lanes};

#[derive(Debug, Clone, Copy)]
pub struct Portable;

#[inline(always)]
fn zip_with(a: Lanes, b: Lanes, f: impl Fn(u32, u32) -> u32) -> Lanes {
    std::array::from_fn(|i| f(a[i], b[i]))
}

#[inline(always)]
fn lane_mask(c: bool) -> u32 {
    if c { u32::MAX } else { 0 }
}

impl LaneEngine for Portable {
    type Vector = Lanes;

    const NAME: &'static str = "portable";

    #[inline(always)]
    fn load(lanes: &Lanes) -> Lanes {
        *lanes
    }

    #[inline(always)]
    fn store(v: Lanes) -> Lanes {
        v
    }

    #[inline(always)]
    fn splat(x: u32) -> Lanes {
        [x; 4]
    }

    #[inline(always)]
    fn mul_hi(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, |x, y| ((x as u64 * y as u64) >> 32) as u32)
    }

    #[inline(always)]
    fn mul_lo(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, u32::wrapping_mul)
    }

    #[inline(always)]
    fn add(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, u32::wrapping_add)
    }

    #[inline(always)]
    fn sub(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, u32::wrapping_sub)
    }

    #[inline(always)]
    fn cmp_eq(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, |x, y| lane_mask(x == y))
    }

    #[inline(always)]
    fn cmp_ge(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, |x, y| lane_mask(x >= y))
    }

    #[inline(always)]
    fn and(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, |x, y| x & y)
    }

    #[inline(always)]
    fn or(a: Lanes, b: Lanes) -> Lanes {
        zip_with(a, b, |x, y| x | y)
    }

    #[inline(always)]
    fn and_not(a: Lanes, mask: Lanes) -> Lanes {
        zip_with(a, mask, |x, m| x & !m)
    }
}
