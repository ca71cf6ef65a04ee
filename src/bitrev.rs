//! Bit-reversal permutation for the in-place iterative FFT layout.

use alloc::vec::Vec;

/// Reverse the low `log2(size)` bits of `index`.
///
/// `size` must be a power of two and `index < size`. The mapping is a
/// bijection on `[0, size)` and its own inverse, which is what lets the
/// engine alias its natural-order and butterfly-order buffer views.
#[inline]
pub fn bit_reverse(index: usize, size: usize) -> usize {
    let mut rev = 0;
    let mut idx = index;
    let mut span = size;
    while span > 1 {
        rev = (rev << 1) | (idx & 1);
        idx >>= 1;
        span >>= 1;
    }
    rev
}

/// Build the full permutation table for a transform of `size` points:
/// `permutation(size)[i] == bit_reverse(i, size)`.
///
/// The engine computes this once per (re)initialization and uses it to
/// route natural-order reads and writes to their butterfly-order slots.
pub fn permutation(size: usize) -> Vec<usize> {
    (0..size).map(|i| bit_reverse(i, size)).collect()
}
