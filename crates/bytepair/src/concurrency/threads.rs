//! # Thread Utilities

use std::{env, num::NonZeroUsize, thread};

/// The search list of environment variables that Rayon uses to control parallelism.
pub const RAYON_VARS: &[&str] = &["RAYON_NUM_THREADS", "RAYON_RS_NUM_CPUS"];

/// Get the max parallelism available.
///
/// Scans `RAYON_VARS` first; then falls back to ``thread::available_parallelism()``.
pub fn est_max_parallelism() -> usize {
    RAYON_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .filter_map(|s| s.trim().parse::<usize>().ok())
        .find(|&x| x > 0)
        .unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
}

/// Resolve a requested degree of parallelism.
///
/// ``min(requested, est_max_parallelism())``; `None` requests the maximum.
pub fn resolve_parallelism(requested: Option<NonZeroUsize>) -> usize {
    let sys_max = est_max_parallelism();
    requested.map_or(sys_max, |x| x.get().min(sys_max))
}
