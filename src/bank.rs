//! Small-prime bank and Barrett constants.
//!
//! Both tables are folded at compile time and live for the whole process;
//! nothing here is ever mutated.

// ─── Prime bank ────────────────────────────────────────────────────────────

/// First eight primes.
pub const BASE_PRIMES: [u32; 8] = [2, 3, 5, 7, 11, 13, 17, 19];

/// Next eight primes, swept after the base bank.
pub const EXTENDED_PRIMES: [u32; 8] = [23, 29, 31, 37, 41, 43, 47, 53];

pub const BANK_SIZE: usize = BASE_PRIMES.len() + EXTENDED_PRIMES.len();

/// The full sieving bank, 2..=53 in ascending order.
pub const SMALL_PRIMES: [u32; BANK_SIZE] = join_banks(BASE_PRIMES, EXTENDED_PRIMES);

const fn join_banks(base: [u32; 8], extended: [u32; 8]) -> [u32; BANK_SIZE] {
    let mut out = [0u32; BANK_SIZE];
    let mut i = 0;
    while i < 8 {
        out[i] = base[i];
        out[8 + i] = extended[i];
        i += 1;
    }
    out
}

// ─── Barrett constants ─────────────────────────────────────────────────────

/// Fixed-point reciprocal `ceil(2^32 / p)`.
///
/// Computed in u64 so `2^32 + p - 1` cannot overflow. Only meaningful for
/// `p >= 2`: the result for `p == 1` would need 33 bits.
#[inline]
pub const fn barrett_magic(p: u32) -> u32 {
    debug_assert!(p >= 2);
    (((1u64 << 32) + p as u64 - 1) / p as u64) as u32
}

/// One sieving prime paired with its precomputed reciprocal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankEntry {
    pub prime: u32,
    pub magic: u32,
}

/// Prime bank with constants, indexed like [`SMALL_PRIMES`].
pub const BANK: [BankEntry; BANK_SIZE] = build_bank();

const fn build_bank() -> [BankEntry; BANK_SIZE] {
    let mut out = [BankEntry { prime: 0, magic: 0 }; BANK_SIZE];
    let mut i = 0;
    while i < BANK_SIZE {
        let p = SMALL_PRIMES[i];
        out[i] = BankEntry { prime: p, magic: barrett_magic(p) };
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_contents() {
        assert_eq!(SMALL_PRIMES.len(), 16);
        assert_eq!(SMALL_PRIMES[0], 2);
        assert_eq!(SMALL_PRIMES[15], 53);
        assert!(SMALL_PRIMES.windows(2).all(|w| w[0] < w[1]));
        assert!(SMALL_PRIMES.iter().all(|&p| crate::scalar::is_prime(p as u64)));
    }

    #[test]
    fn test_known_magic() {
        assert_eq!(barrett_magic(2), 2_147_483_648);
        assert_eq!(barrett_magic(3), 1_431_655_766);
        assert_eq!(barrett_magic(53), 81_037_119);
    }

    #[test]
    fn test_magic_is_ceiling() {
        for entry in BANK {
            let p = entry.prime as u64;
            let m = entry.magic as u64;
            assert!(m * p >= 1 << 32, "p={}", p);
            assert!((m - 1) * p < 1 << 32, "p={}", p);
        }
    }

    #[test]
    fn test_bank_matches_primes() {
        for (entry, &p) in BANK.iter().zip(SMALL_PRIMES.iter()) {
            assert_eq!(entry.prime, p);
            assert_eq!(entry.magic, barrett_magic(p));
        }
    }
}
