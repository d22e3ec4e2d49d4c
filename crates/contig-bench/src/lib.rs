//! Benchmark workloads for contig.
//!
//! Provides pre-built inputs shared by the criterion benches:
//!
//! - [`SIZES`]: element counts exercised by every growth benchmark
//! - [`filled_array`] / [`filled_vec`]: equivalent `DynArray` and `Vec` inputs
//! - [`strided_indices`]: a deterministic non-sequential access pattern

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig::prelude::*;

/// Element counts for growth and traversal benchmarks.
pub const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];

/// A `DynArray` holding `0..n`.
pub fn filled_array(n: usize) -> DynArray<u64> {
    let mut array = DynArray::new();
    for i in 0..n as u64 {
        array.push_back(i);
    }
    array
}

/// A `Vec` holding `0..n`, the baseline for comparisons.
pub fn filled_vec(n: usize) -> Vec<u64> {
    let mut vec = Vec::new();
    for i in 0..n as u64 {
        vec.push(i);
    }
    vec
}

/// Visit every index in `0..n` exactly once with a large odd stride.
///
/// The stride is coprime with any power of two, so for power-of-two `n`
/// this is a full permutation; other sizes are rounded down to the
/// nearest power of two.
pub fn strided_indices(n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let len = 1usize << (usize::BITS - 1 - n.leading_zeros());
    const STRIDE: usize = 7_919;
    (0..len).map(|i| i.wrapping_mul(STRIDE) & (len - 1)).collect()
}
