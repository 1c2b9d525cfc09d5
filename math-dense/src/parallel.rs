//! Parallel utilities with feature-gated implementations
//!
//! With the `rayon` feature enabled, row-wise work is spread over the rayon
//! thread pool; otherwise the sequential fallbacks are used.

/// Parallel map with index
#[cfg(feature = "rayon")]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

/// Sequential map with index (fallback)
#[cfg(not(feature = "rayon"))]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    F: Fn(usize) -> U,
{
    (0..count).map(f).collect()
}
