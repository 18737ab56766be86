//! Scalar trial-division prover.
//!
//! Ground truth for the whole crate: the vector sieve only ever narrows the
//! set of candidates that reach this function, it never decides "prime" on
//! its own.

/// Integer square root — overflow-safe for all u64 values.
/// Newton-corrected from f64 seed; checked arithmetic keeps the correction
/// loops from wrapping near `u64::MAX`.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 { return 0; }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) { x -= 1; }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) { x += 1; }
    x
}

/// Deterministic primality by trial division over odd divisors up to √n.
pub fn is_prime(n: u64) -> bool {
    if n < 2 { return false; }
    if n % 2 == 0 { return n == 2; }

    let limit = isqrt(n);
    let mut d = 3;
    while d <= limit {
        if n % d == 0 { return false; }
        d += 2;
    }
    true
}

/// Fill `out` with the scalar verdict for every value in `numbers`.
#[inline]
pub(crate) fn prove_into(numbers: &[u64], out: &mut [bool]) {
    debug_assert_eq!(numbers.len(), out.len());
    for (slot, &n) in out.iter_mut().zip(numbers) {
        *slot = is_prime(n);
    }
}
