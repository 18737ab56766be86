//! SSE2 engine (x86_64 baseline, always present on this target).
//!
//! SSE2 has neither a 32-bit low multiply nor unsigned compares, so both are
//! built from `_mm_mul_epu32` on even/odd lanes and a sign-bias trick.

use std::arch::x86_64::*;

use super::{LaneEngine, Lanes};

#[derive(Debug, Clone, Copy)]
pub struct Sse2;

// SAFETY (whole impl): every intrinsic used below requires only SSE2, which
// the enclosing module's `cfg(target_feature = "sse2")` guarantees. Loads and
// stores go through `[u32; 4]`, exactly the 16 bytes an `__m128i` spans.
impl LaneEngine for Sse2 {
    type Vector = __m128i;

    const NAME: &'static str = "sse2";

    #[inline(always)]
    fn load(lanes: &Lanes) -> __m128i {
        unsafe { _mm_loadu_si128(lanes.as_ptr().cast()) }
    }

    #[inline(always)]
    fn store(v: __m128i) -> Lanes {
        let mut out = [0u32; 4];
        unsafe { _mm_storeu_si128(out.as_mut_ptr().cast(), v) };
        out
    }

    #[inline(always)]
    fn splat(x: u32) -> __m128i {
        unsafe { _mm_set1_epi32(x as i32) }
    }

    #[inline(always)]
    fn mul_hi(a: __m128i, b: __m128i) -> __m128i {
        unsafe {
            // 64-bit products of lanes 0,2 and of lanes 1,3
            let even = _mm_mul_epu32(a, b);
            let odd = _mm_mul_epu32(_mm_srli_epi64::<32>(a), _mm_srli_epi64::<32>(b));
            let odd_lanes = _mm_set_epi32(-1, 0, -1, 0);
            _mm_or_si128(_mm_srli_epi64::<32>(even), _mm_and_si128(odd, odd_lanes))
        }
    }

    #[inline(always)]
    fn mul_lo(a: __m128i, b: __m128i) -> __m128i {
        unsafe {
            let even = _mm_mul_epu32(a, b);
            let odd = _mm_mul_epu32(_mm_srli_epi64::<32>(a), _mm_srli_epi64::<32>(b));
            let even_lanes = _mm_set_epi32(0, -1, 0, -1);
            _mm_or_si128(_mm_and_si128(even, even_lanes), _mm_slli_epi64::<32>(odd))
        }
    }

    #[inline(always)]
    fn add(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_add_epi32(a, b) }
    }

    #[inline(always)]
    fn sub(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_sub_epi32(a, b) }
    }

    #[inline(always)]
    fn cmp_eq(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_cmpeq_epi32(a, b) }
    }

    #[inline(always)]
    fn cmp_ge(a: __m128i, b: __m128i) -> __m128i {
        unsafe {
            // Flip the sign bit so signed compare orders unsigned values
            let bias = _mm_set1_epi32(i32::MIN);
            let b_gt_a = _mm_cmpgt_epi32(_mm_xor_si128(b, bias), _mm_xor_si128(a, bias));
            _mm_xor_si128(b_gt_a, _mm_set1_epi32(-1))
        }
    }

    #[inline(always)]
    fn and(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_and_si128(a, b) }
    }

    #[inline(always)]
    fn or(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_or_si128(a, b) }
    }

    #[inline(always)]
    fn and_not(a: __m128i, mask: __m128i) -> __m128i {
        unsafe { _mm_andnot_si128(mask, a) }
    }

    #[inline(always)]
    fn bitmask(mask: __m128i) -> u8 {
        unsafe { _mm_movemask_ps(_mm_castsi128_ps(mask)) as u8 }
    }
}
