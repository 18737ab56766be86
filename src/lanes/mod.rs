//! Lane engines: the hardware-specific half of the vector sieve.
//!
//! The Barrett reduction and the sieve loop are written once against
//! [`LaneEngine`]; a backend only supplies load/store, lane arithmetic and
//! mask primitives for four unsigned 32-bit lanes.
//!
//! | Target          | Backend      | Instruction set            |
//! |-----------------|--------------|----------------------------|
//! | x86_64          | [`Sse2`]     | SSE2 (x86_64 baseline)     |
//! | aarch64         | [`Neon`]     | Advanced SIMD (baseline)   |
//! | anything else   | [`Portable`] | plain arrays               |
//!
//! Selection happens at compile time through [`NativeEngine`]. There is no
//! runtime feature probing.

mod portable;
pub use portable::Portable;

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
mod sse2;
#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub use sse2::Sse2;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use neon::Neon;

/// Lanes per vector register.
pub const LANES: usize = 4;

/// One lane group as it sits in memory.
pub type Lanes = [u32; LANES];

/// Four-lane unsigned 32-bit vector operations.
///
/// Comparison results are lane masks: every lane is either all ones or
/// zero. Arithmetic wraps modulo 2^32 like the hardware does.
pub trait LaneEngine {
    type Vector: Copy;

    /// Short name used in logs and benchmark tables.
    const NAME: &'static str;

    fn load(lanes: &Lanes) -> Self::Vector;
    fn store(v: Self::Vector) -> Lanes;
    fn splat(x: u32) -> Self::Vector;

    /// Upper 32 bits of the 64-bit product in each lane.
    fn mul_hi(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    /// Lower 32 bits of the product in each lane.
    fn mul_lo(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    fn add(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    fn sub(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    fn cmp_eq(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    /// Unsigned `a >= b`.
    fn cmp_ge(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    fn and(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    fn or(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    /// `a & !mask`
    fn and_not(a: Self::Vector, mask: Self::Vector) -> Self::Vector;

    /// Collapse a lane mask into one bit per lane, lane 0 in bit 0.
    #[inline]
    fn bitmask(mask: Self::Vector) -> u8 {
        Self::store(mask)
            .iter()
            .enumerate()
            .fold(0u8, |bits, (i, &lane)| bits | (((lane != 0) as u8) << i))
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub type NativeEngine = Sse2;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub type NativeEngine = Neon;

#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon"),
)))]
pub type NativeEngine = Portable;
