//! # bytepair-disk-cache
//!
//! Per-user disk cache for the resource files `bytepair` downloads.
//!
//! Directory resolution, highest priority first:
//! * an explicit path, from [`BytepairDiskCacheOptions`];
//! * the [`BYTEPAIR_CACHE_DIR`] / [`BYTEPAIR_DATA_DIR`] environment variables;
//! * the platform defaults of [`directories_next::ProjectDirs`].
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod disk_cache;
pub mod path_resolver;
pub mod path_utils;

pub use disk_cache::{BytepairDiskCache, BytepairDiskCacheOptions};

/// Environment variable key to override the default cache directory.
pub const BYTEPAIR_CACHE_DIR: &str = "BYTEPAIR_CACHE_DIR";
/// Environment variable key to override the default data directory.
pub const BYTEPAIR_DATA_DIR: &str = "BYTEPAIR_DATA_DIR";

/// Default [`PathResolver`] for bytepair.
pub const BYTEPAIR_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.bytepair",
    organization: "",
    application: "bytepair",
    cache_env_vars: &[BYTEPAIR_CACHE_DIR],
    data_env_vars: &[BYTEPAIR_DATA_DIR],
};
