//! # Directory Resources

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    errors::{BpeError, BpeResult},
    resources::{KeyedResource, ResourceLoader},
};

/// Environment variable naming a directory holding `encoder.json` and `vocab.bpe`.
pub const BYTEPAIR_RESOURCE_DIR: &str = "BYTEPAIR_RESOURCE_DIR";

/// A [`ResourceLoader`] over a local directory.
///
/// Resources are looked up by file name directly under the directory;
/// resource keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResources {
    dir: PathBuf,
}

impl DirectoryResources {
    /// Resources in `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Resources in the directory named by [`BYTEPAIR_RESOURCE_DIR`].
    ///
    /// ## Returns
    /// [`BpeError::MissingResource`] if the variable is unset or empty.
    pub fn from_env() -> BpeResult<Self> {
        Self::resolve(None::<PathBuf>)
    }

    /// Resolve the resource directory.
    ///
    /// Resolution Order:
    /// 1. `dir`, if present.
    /// 2. ``env[$BYTEPAIR_RESOURCE_DIR]``, if non-empty.
    pub fn resolve<P: AsRef<Path>>(dir: Option<P>) -> BpeResult<Self> {
        if let Some(dir) = dir {
            return Ok(Self::new(dir));
        }
        match env::var_os(BYTEPAIR_RESOURCE_DIR) {
            Some(value) if !value.is_empty() => {
                log::debug!("resource dir from ${BYTEPAIR_RESOURCE_DIR}: {value:?}");
                Ok(Self::new(value))
            }
            _ => Err(BpeError::MissingResource {
                path: PathBuf::from(format!("${BYTEPAIR_RESOURCE_DIR}")),
            }),
        }
    }

    /// The resource directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResourceLoader for DirectoryResources {
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> BpeResult<PathBuf> {
        let file_name = resource.file_name().ok_or_else(|| {
            BpeError::External(format!("resource has no file name: {resource:?}"))
        })?;

        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Err(BpeError::MissingResource { path });
        }
        Ok(path)
    }
}
