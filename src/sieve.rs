//! Composite-mask accumulation across the small-prime bank.

use std::fmt;

use crate::bank::BANK;
use crate::lanes::{LaneEngine, Lanes, LANES};
use crate::reduce::{barrett_remainder_groups, Divisor};

/// One bit per lane; a set bit means some bank prime divides that lane's
/// candidate (and the candidate is not that prime itself).
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CompositeMask(pub u8);

impl CompositeMask {
    #[inline]
    pub fn is_composite(self, lane: usize) -> bool {
        debug_assert!(lane < LANES);
        (self.0 >> lane) & 1 == 1
    }

    /// Lanes that still need the scalar prover.
    #[inline]
    pub fn survivors(self) -> u32 {
        LANES as u32 - self.0.count_ones()
    }
}

impl fmt::Debug for CompositeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeMask({:0width$b})", self.0, width = LANES)
    }
}

/// Sweep every bank prime over `G` lane groups at once.
///
/// Scans the whole bank unconditionally; a group whose lanes are all marked
/// early still pays for the remaining primes.
pub fn sieve_groups<E: LaneEngine, const G: usize>(groups: &[Lanes; G]) -> [CompositeMask; G] {
    let values: [E::Vector; G] = std::array::from_fn(|g| E::load(&groups[g]));
    let zero = E::splat(0);
    let mut masks = [zero; G];

    for &entry in BANK.iter() {
        let d = Divisor::<E>::splat(entry);
        let rems = barrett_remainder_groups::<E, G>(values, d);
        for g in 0..G {
            let divisible = E::cmp_eq(rems[g], zero);
            let is_self = E::cmp_eq(values[g], d.prime);
            masks[g] = E::or(masks[g], E::and_not(divisible, is_self));
        }
    }

    masks.map(|m| CompositeMask(E::bitmask(m)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::SMALL_PRIMES;
    use crate::lanes::{NativeEngine, Portable};

    #[test]
    fn test_reference_batch() {
        let groups = [[2, 3, 4, 17], [18, 25, 97, 100]];
        let [a, b] = sieve_groups::<NativeEngine, 2>(&groups);
        assert_eq!(a, CompositeMask(0b0100));
        assert_eq!(b, CompositeMask(0b1011));
    }

    #[test]
    fn test_bank_primes_not_marked() {
        for chunk in SMALL_PRIMES.chunks(4) {
            let lanes: Lanes = [chunk[0], chunk[1], chunk[2], chunk[3]];
            let [m] = sieve_groups::<NativeEngine, 1>(&[lanes]);
            assert_eq!(m, CompositeMask(0), "{:?}", lanes);
        }
    }

    #[test]
    fn test_zero_and_one() {
        // 0 is divisible by everything; 1 by nothing — the scalar prover
        // settles 1
        let [m] = sieve_groups::<NativeEngine, 1>(&[[0, 1, 59, 2_809]]);
        assert!(m.is_composite(0));
        assert!(!m.is_composite(1));
        assert!(!m.is_composite(2));
        assert!(m.is_composite(3)); // 53²
        assert_eq!(m.survivors(), 2);
    }

    #[test]
    fn test_large_lanes() {
        // 4294967291 is prime; 4294967295 = 3·5·17·257·65537
        let [m] = sieve_groups::<NativeEngine, 1>(&[[4_294_967_291, 4_294_967_295, 4_294_967_294, 4_294_967_293]]);
        assert_eq!(m, CompositeMask(0b0110));
    }

    #[test]
    fn test_engines_agree() {
        for start in (0u32..5_000).step_by(8) {
            let groups = [
                [start, start + 1, start + 2, start + 3],
                [start + 4, start + 5, start + 6, start + 7],
            ];
            assert_eq!(
                sieve_groups::<Portable, 2>(&groups),
                sieve_groups::<NativeEngine, 2>(&groups),
                "start={}", start
            );
        }
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", CompositeMask(0b0101)), "CompositeMask(0101)");
    }
}
