//! # Resource Loader

use std::path::PathBuf;

use crate::{errors::BpeResult, resources::KeyedResource};

/// A trait for loading resources.
pub trait ResourceLoader {
    /// Load a resource, returning the path of a local copy.
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> BpeResult<PathBuf>;
}

#[cfg(feature = "download")]
impl ResourceLoader for crate::disk_cache::BytepairDiskCache {
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> BpeResult<PathBuf> {
        self.load_cached_path(resource.key, resource.resource.urls, true)
            .map_err(|e| crate::errors::BpeError::External(format!("{e:#}")))
    }
}
