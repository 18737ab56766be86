//! Barrett remainder over lane groups.
//!
//! With `m = ceil(2^32 / p)` and `n < 2^32`, the estimate
//! `q = (n · m) >> 32` is either `n / p` or one above it. In the second case
//! `n - q·p` wraps below zero and lands at `2^32 - p + r >= p`, so a single
//! conditional fold of `p` recovers the exact remainder `r` in `[0, p)`.

use crate::bank::BankEntry;
use crate::lanes::LaneEngine;

/// One sieving prime broadcast across all lanes.
pub struct Divisor<E: LaneEngine> {
    pub prime: E::Vector,
    pub magic: E::Vector,
}

impl<E: LaneEngine> Clone for Divisor<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: LaneEngine> Copy for Divisor<E> {}

impl<E: LaneEngine> Divisor<E> {
    #[inline(always)]
    pub fn splat(entry: BankEntry) -> Self {
        Self { prime: E::splat(entry.prime), magic: E::splat(entry.magic) }
    }
}

/// Exact `n mod p` for every lane of one group.
#[inline(always)]
pub fn barrett_remainder<E: LaneEngine>(n: E::Vector, d: Divisor<E>) -> E::Vector {
    let q = E::mul_hi(n, d.magic);
    let r = E::sub(n, E::mul_lo(q, d.prime));
    let overshot = E::cmp_ge(r, d.prime);
    E::add(r, E::and(overshot, d.prime))
}

/// [`barrett_remainder`] applied to `G` independent groups against the same
/// divisor.
#[inline(always)]
pub fn barrett_remainder_groups<E: LaneEngine, const G: usize>(
    groups: [E::Vector; G],
    d: Divisor<E>,
) -> [E::Vector; G] {
    groups.map(|n| barrett_remainder::<E>(n, d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::BANK;
    use crate::lanes::{Lanes, NativeEngine, Portable};

    fn remainders<E: LaneEngine>(lanes: Lanes, entry: BankEntry) -> Lanes {
        E::store(barrett_remainder::<E>(E::load(&lanes), Divisor::splat(entry)))
    }

    fn check_exact<E: LaneEngine>(lanes: Lanes) {
        for entry in BANK {
            let got = remainders::<E>(lanes, entry);
            for i in 0..4 {
                assert_eq!(got[i], lanes[i] % entry.prime,
                    "{}: {} mod {}", E::NAME, lanes[i], entry.prime);
            }
        }
    }

    #[test]
    fn test_small_values_exact() {
        for base in (0u32..2_000).step_by(4) {
            let lanes = [base, base + 1, base + 2, base + 3];
            check_exact::<Portable>(lanes);
            check_exact::<NativeEngine>(lanes);
        }
    }

    #[test]
    fn test_top_of_range_exact() {
        // Quotient estimate overshoots here (e.g. 2^32 - 2 against 3)
        for base in (u32::MAX - 4_000..=u32::MAX - 3).step_by(4) {
            let lanes = [base, base + 1, base + 2, base + 3];
            check_exact::<Portable>(lanes);
            check_exact::<NativeEngine>(lanes);
        }
    }

    #[test]
    fn test_overshoot_case() {
        let entry = BankEntry { prime: 3, magic: crate::bank::barrett_magic(3) };
        let n = u32::MAX - 1;
        // Raw estimate really is one too high for this lane
        let q = ((n as u64 * entry.magic as u64) >> 32) as u32;
        assert_eq!(q, n / 3 + 1);
        assert_eq!(remainders::<NativeEngine>([n; 4], entry), [n % 3; 4]);
    }

    #[test]
    fn test_groups_match_single() {
        let a = [97, 100, 4_294_967_291, 0];
        let b = [53, 106, 2_147_483_648, 1];
        for entry in BANK {
            let d = Divisor::<NativeEngine>::splat(entry);
            let [ra, rb] = barrett_remainder_groups::<NativeEngine, 2>(
                [NativeEngine::load(&a), NativeEngine::load(&b)], d);
            assert_eq!(NativeEngine::store(ra), remainders::<NativeEngine>(a, entry));
            assert_eq!(NativeEngine::store(rb), remainders::<NativeEngine>(b, entry));
        }
    }
}
