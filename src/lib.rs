//! SIMD batch primality pre-filter.
//!
//! Candidates are swept four to a lane group against the first sixteen
//! primes using Barrett reduction; anything the sieve cannot rule out, and
//! anything too wide for a 32-bit lane, is settled by trial division.
//!
//! ```
//! use batch_sieve::filter_batch;
//!
//! let verdicts = filter_batch(&[2, 3, 4, 17, 18, 25, 97, 100]);
//! assert_eq!(verdicts, [true, true, false, true, false, false, true, false]);
//! ```

pub mod bank;
pub mod batch;
pub mod error;
pub mod lanes;
pub mod reduce;
pub mod scalar;
pub mod sieve;

pub use bank::{barrett_magic, BankEntry, BANK, SMALL_PRIMES};
pub use batch::{
    filter_batch, filter_batch_with, filter_batch_with_stats, filter_scalar, Backend,
    BatchProcessor, PathStats, GROUPS, STRIDE, VECTOR_THRESHOLD,
};
pub use error::{CliError, CliResult};
pub use lanes::{LaneEngine, NativeEngine, Portable, LANES};
pub use scalar::{is_prime, isqrt};
pub use sieve::CompositeMask;
