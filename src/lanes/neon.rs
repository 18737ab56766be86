//! NEON engine for aarch64 (Apple M-series, Graviton, …).

use std::arch::aarch64::*;

use super::{LaneEngine, Lanes};

#[derive(Debug, Clone, Copy)]
pub struct Neon;

// SAFETY (whole impl): Advanced SIMD is guaranteed by the module's
// `cfg(target_feature = "neon")`; loads and stores go through `[u32; 4]`.
impl LaneEngine for Neon {
    type Vector = uint32x4_t;

    const NAME: &'static str = "neon";

    #[inline(always)]
    fn load(lanes: &Lanes) -> uint32x4_t {
        unsafe { vld1q_u32(lanes.as_ptr()) }
    }

    #[inline(always)]
    fn store(v: uint32x4_t) -> Lanes {
        let mut out = [0u32; 4];
        unsafe { vst1q_u32(out.as_mut_ptr(), v) };
        out
    }

    #[inline(always)]
    fn splat(x: u32) -> uint32x4_t {
        unsafe { vdupq_n_u32(x) }
    }

    #[inline(always)]
    fn mul_hi(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe {
            let lo = vmull_u32(vget_low_u32(a), vget_low_u32(b));
            let hi = vmull_u32(vget_high_u32(a), vget_high_u32(b));
            vcombine_u32(vshrn_n_u64::<32>(lo), vshrn_n_u64::<32>(hi))
        }
    }

    #[inline(always)]
    fn mul_lo(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe { vmulq_u32(a, b) }
    }

    #[inline(always)]
    fn add(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe { vaddq_u32(a, b) }
    }

    #[inline(always)]
    fn sub(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe { vsubq_u32(a, b) }
    }

    #[inline(always)]
    fn cmp_eq(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe { vceqq_u32(a, b) }
    }

    #[inline(always)]
    fn cmp_ge(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe { vcgeq_u32(a, b) }
    }

    #[inline(always)]
    fn and(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe { vandq_u32(a, b) }
    }

    #[inline(always)]
    fn or(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        unsafe { vorrq_u32(a, b) }
    }

    #[inline(always)]
    fn and_not(a: uint32x4_t, mask: uint32x4_t) -> uint32x4_t {
        unsafe { vbicq_u32(a, mask) }
    }
}
