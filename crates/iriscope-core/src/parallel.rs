//! Parallelization helpers for per-pixel operations
//!
//! Pixel loops over small buffers run sequentially; larger ones go through
//! rayon. Both paths visit whole chunks with order-independent math, so the
//! result never depends on which path ran.

use rayon::prelude::*;

/// Minimum number of pixels to trigger parallel processing
pub(crate) const PARALLEL_THRESHOLD: usize = 30_000;

/// Fold `chunk_size`-sized slices of `data` into an accumulator
///
/// `init` builds an empty accumulator; above the threshold rayon folds per
/// thread and `reduce_fn` merges the partial accumulators.
pub(crate) fn parallel_fold_reduce<T, A, I, F, R>(
    data: &[T],
    chunk_size: usize,
    init: I,
    fold_fn: F,
    reduce_fn: R,
) -> A
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync,
    F: Fn(A, &[T]) -> A + Sync,
    R: Fn(A, A) -> A + Sync,
{
    if data.len() < chunk_size * PARALLEL_THRESHOLD {
        return data.chunks_exact(chunk_size).fold(init(), fold_fn);
    }

    data.par_chunks_exact(chunk_size)
        .fold(&init, &fold_fn)
        .reduce(&init, &reduce_fn)
}

/// Run `f` over every `chunk_size`-sized slice of `data` in place
pub(crate) fn parallel_for_each_chunk_mut<T, F>(data: &mut [T], chunk_size: usize, f: F)
where
    T: Send + Sync,
    F: Fn(&mut [T]) + Sync,
{
    if data.len() < chunk_size * PARALLEL_THRESHOLD {
        for chunk in data.chunks_exact_mut(chunk_size) {
            f(chunk);
        }
        return;
    }

    data.par_chunks_exact_mut(chunk_size).for_each(|chunk| f(chunk));
}
