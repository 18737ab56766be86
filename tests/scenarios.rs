//! End-to-end batch scenarios, cross-checked against `primal` as an
//! independent oracle.

use batch_sieve::{
    filter_batch, filter_batch_with, filter_batch_with_stats, filter_scalar, is_prime,
    NativeEngine, Portable, SMALL_PRIMES,
};

fn oracle(numbers: &[u64]) -> Vec<bool> {
    numbers.iter().map(|&n| primal::is_prime(n)).collect()
}

#[test]
fn test_reference_batch() {
    let nums: [u64; 8] = [2, 3, 4, 17, 18, 25, 97, 100];
    assert_eq!(
        filter_batch(&nums),
        [true, true, false, true, false, false, true, false]
    );
}

#[test]
fn test_consecutive_from_one_million() {
    let nums: Vec<u64> = (1_000_000..1_000_020).collect();
    let (verdicts, stats) = filter_batch_with_stats::<NativeEngine>(&nums);
    assert_eq!(verdicts, filter_scalar(&nums));
    assert_eq!(verdicts, oracle(&nums));
    assert_eq!(stats.vector, 16);
    assert_eq!(stats.tail, 4);
    let primes: Vec<u64> = nums.iter().zip(&verdicts).filter(|(_, &p)| p).map(|(&n, _)| n).collect();
    assert_eq!(primes, [1_000_003]);
}

#[test]
fn test_one_oversized_among_small() {
    let mut nums: Vec<u64> = (30..45).collect();
    nums.insert(3, 4_294_967_311);
    assert_eq!(nums.len(), 16);

    let (verdicts, stats) = filter_batch_with_stats::<NativeEngine>(&nums);
    assert_eq!(verdicts, filter_scalar(&nums));
    assert_eq!(verdicts, oracle(&nums));
    assert!(verdicts[3]);
    assert_eq!(stats.stride_fallback, 8);
    assert_eq!(stats.vector, 8);
}

#[test]
fn test_empty_and_one() {
    assert!(filter_batch(&[]).is_empty());
    assert_eq!(filter_batch(&[1]), [false]);
}

#[test]
fn test_bank_primes_in_vector_path() {
    let nums: Vec<u64> = SMALL_PRIMES.iter().map(|&p| p as u64).collect();
    let (verdicts, stats) = filter_batch_with_stats::<NativeEngine>(&nums);
    assert_eq!(stats.vector, 16);
    assert!(verdicts.iter().all(|&p| p));
}

#[test]
fn test_squares_of_bank_primes() {
    // p² is divisible by p but is not p: must be rejected
    let nums: Vec<u64> = SMALL_PRIMES.iter().map(|&p| p as u64 * p as u64).collect();
    assert!(filter_batch(&nums).iter().all(|&p| !p));
}

#[test]
fn test_first_ten_thousand() {
    let nums: Vec<u64> = (0..10_000).collect();
    let verdicts = filter_batch(&nums);
    assert_eq!(verdicts, oracle(&nums));
    assert_eq!(verdicts.iter().filter(|&&p| p).count(), 1_229);
}

#[test]
fn test_top_of_u32_range() {
    let nums: Vec<u64> = (u32::MAX as u64 - 999..=u32::MAX as u64).collect();
    assert_eq!(filter_batch(&nums), oracle(&nums));
    assert_eq!(filter_batch_with::<Portable>(&nums), oracle(&nums));
}

#[test]
fn test_straddling_lane_width() {
    // Strides before, across and after 2^32
    let nums: Vec<u64> = (u32::MAX as u64 - 20..u32::MAX as u64 + 20).collect();
    let (verdicts, stats) = filter_batch_with_stats::<NativeEngine>(&nums);
    assert_eq!(verdicts, oracle(&nums));
    assert!(stats.vector > 0);
    assert!(stats.stride_fallback > 0);
    assert_eq!(stats.total(), nums.len());
}

#[test]
fn test_carmichael_and_semiprimes() {
    // Carmichael numbers (8911 = 7·19·67) and products of primes above 53
    // that the sieve cannot see
    let nums: [u64; 16] = [
        561, 1_105, 1_729, 2_465, 2_821, 6_601, 8_911, 4_294_967_291,
        59 * 61, 61 * 67, 65_521 * 65_519, 3_481, 5_041, 97 * 101, 101, 65_537,
    ];
    let verdicts = filter_batch(&nums);
    assert_eq!(verdicts, oracle(&nums));
    assert_eq!(verdicts, nums.iter().map(|&n| is_prime(n)).collect::<Vec<_>>());
}
