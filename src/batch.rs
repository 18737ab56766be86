//! Batch orchestration: decides, per stride, whether the vector sieve can
//! run and stitches the verdicts back into input order.
//!
//! Paths, in the order they are tried:
//!   1. batches shorter than [`VECTOR_THRESHOLD`] go straight to the scalar
//!      prover;
//!   2. each full stride of [`STRIDE`] candidates is sieved in
//!      [`GROUPS`] lane groups, unless one of its values does not fit a
//!      32-bit lane, in which case the whole stride is proved scalar;
//!   3. the `len % STRIDE` tail is proved scalar.
//!
//! Sieve survivors are always confirmed by [`scalar::is_prime`]; lanes the
//! sieve marks composite are final.

use tracing::{debug, trace};

use crate::lanes::{LaneEngine, Lanes, NativeEngine, Portable, LANES};
use crate::scalar::{self, is_prime};
use crate::sieve::sieve_groups;

/// Below this many candidates the vector setup is not worth it.
pub const VECTOR_THRESHOLD: usize = 16;

/// Lane groups sieved together per stride.
pub const GROUPS: usize = 2;

pub const STRIDE: usize = LANES * GROUPS;

// ─── Path accounting ───────────────────────────────────────────────────────

/// How many candidates each path handled during one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Whole batch was under [`VECTOR_THRESHOLD`].
    pub small_batch: usize,
    /// Candidates that went through the vector sieve.
    pub vector: usize,
    /// Subset of `vector` rejected by the sieve without a scalar check.
    pub vector_rejected: usize,
    /// Candidates in strides holding a value above `u32::MAX`.
    pub stride_fallback: usize,
    pub tail: usize,
    /// Batch run with [`Backend::Scalar`].
    pub forced_scalar: usize,
}

impl PathStats {
    /// Candidates covered; equals the batch length.
    pub fn total(&self) -> usize {
        self.small_batch + self.vector + self.stride_fallback + self.tail + self.forced_scalar
    }

    /// Candidates that reached the scalar prover by any route.
    pub fn scalar_checks(&self) -> usize {
        self.total() - self.vector_rejected
    }
}

// ─── Core loop ─────────────────────────────────────────────────────────────

/// Split one stride into 32-bit lane groups, or `None` if any value is too
/// wide for a lane.
#[inline]
fn narrow_stride(stride: &[u64]) -> Option<[Lanes; GROUPS]> {
    debug_assert_eq!(stride.len(), STRIDE);
    let mut groups = [[0u32; LANES]; GROUPS];
    for (slot, &n) in groups.iter_mut().flatten().zip(stride) {
        *slot = u32::try_from(n).ok()?;
    }
    Some(groups)
}

fn run<E: LaneEngine>(numbers: &[u64], out: &mut [bool]) -> PathStats {
    debug_assert_eq!(numbers.len(), out.len());
    let mut stats = PathStats::default();

    if numbers.len() < VECTOR_THRESHOLD {
        scalar::prove_into(numbers, out);
        stats.small_batch = numbers.len();
        return stats;
    }

    let mut strides = numbers.chunks_exact(STRIDE);
    let mut slots = out.chunks_exact_mut(STRIDE);

    for (index, (stride, verdicts)) in (&mut strides).zip(&mut slots).enumerate() {
        let Some(groups) = narrow_stride(stride) else {
            trace!(stride = index, "value exceeds 32-bit lane, proving stride scalar");
            scalar::prove_into(stride, verdicts);
            stats.stride_fallback += STRIDE;
            continue;
        };

        let masks = sieve_groups::<E, GROUPS>(&groups);
        stats.vector_rejected += masks.iter().map(|m| LANES - m.survivors() as usize).sum::<usize>();
        for (lane, (&n, slot)) in stride.iter().zip(verdicts.iter_mut()).enumerate() {
            *slot = !masks[lane / LANES].is_composite(lane % LANES) && is_prime(n);
        }
        stats.vector += STRIDE;
    }

    let tail = strides.remainder();
    scalar::prove_into(tail, slots.into_remainder());
    stats.tail = tail.len();

    stats
}

// ─── Public entry points ───────────────────────────────────────────────────

/// Primality verdict for every candidate, in input order, using the
/// target's native lane engine.
pub fn filter_batch(candidates: &[u64]) -> Vec<bool> {
    filter_batch_with::<NativeEngine>(candidates)
}

/// [`filter_batch`] with an explicit lane engine.
pub fn filter_batch_with<E: LaneEngine>(candidates: &[u64]) -> Vec<bool> {
    filter_batch_with_stats::<E>(candidates).0
}

/// [`filter_batch_with`], also reporting which path handled what.
pub fn filter_batch_with_stats<E: LaneEngine>(candidates: &[u64]) -> (Vec<bool>, PathStats) {
    let mut verdicts = vec![false; candidates.len()];
    let stats = run::<E>(candidates, &mut verdicts);
    debug!(engine = E::NAME, len = candidates.len(), ?stats, "batch filtered");
    (verdicts, stats)
}

/// Trial division on every candidate; the reference the vector path must
/// always agree with.
pub fn filter_scalar(candidates: &[u64]) -> Vec<bool> {
    candidates.iter().map(|&n| is_prime(n)).collect()
}

// ─── Reusable processor ────────────────────────────────────────────────────

/// Which engine a [`BatchProcessor`] drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Intrinsics for the compile target ([`NativeEngine`]).
    #[default]
    Native,
    /// Array-backed lanes, identical results on every target.
    Portable,
    /// No sieve at all.
    Scalar,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Native => NativeEngine::NAME,
            Backend::Portable => Portable::NAME,
            Backend::Scalar => "scalar",
        }
    }
}

/// Batch filter bound to one backend, writing into a caller-owned buffer so
/// repeated batches reuse one allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchProcessor {
    backend: Backend,
}

impl BatchProcessor {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Resize `results` to `numbers.len()` and fill it with verdicts.
    pub fn process(&self, numbers: &[u64], results: &mut Vec<bool>) -> PathStats {
        results.clear();
        results.resize(numbers.len(), false);

        let stats = match self.backend {
            Backend::Native => run::<NativeEngine>(numbers, results),
            Backend::Portable => run::<Portable>(numbers, results),
            Backend::Scalar => {
                scalar::prove_into(numbers, results);
                PathStats { forced_scalar: numbers.len(), ..PathStats::default() }
            }
        };
        debug!(backend = self.backend.name(), len = numbers.len(), ?stats, "batch processed");
        stats
    }
}
