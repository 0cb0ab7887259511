//! # Bytepair Disk Cache

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use downloader::{Download, Downloader};

use crate::{BYTEPAIR_CACHE_CONFIG, path_utils};

/// Options for [`BytepairDiskCache`].
#[derive(Clone, Default, Debug)]
pub struct BytepairDiskCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Optional path to the data directory.
    pub data_dir: Option<PathBuf>,

    /// Optional [`Downloader`] builder.
    pub downloader: Option<fn() -> Downloader>,
}

impl BytepairDiskCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the downloader builder.
    pub fn with_downloader(
        mut self,
        downloader: Option<fn() -> Downloader>,
    ) -> Self {
        self.downloader = downloader;
        self
    }
}

/// Disk cache for downloaded resource files.
///
/// Two directories:
/// * the data directory holds user-provided copies, and is only read;
/// * the cache directory holds downloads.
///
/// Leverages [`Downloader`] for downloading files,
/// and [`PathResolver`](`crate::path_resolver::PathResolver`) for resolving
/// both directories.
pub struct BytepairDiskCache {
    /// Cache directory.
    cache_dir: PathBuf,

    /// Data directory.
    data_dir: PathBuf,

    /// Connection pool for downloading files; built on first download.
    downloader: Option<Downloader>,

    /// Optional [`Downloader`] builder.
    downloader_builder: Option<fn() -> Downloader>,
}

impl BytepairDiskCache {
    /// Construct a new [`BytepairDiskCache`].
    pub fn new(options: BytepairDiskCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = BYTEPAIR_CACHE_CONFIG
            .resolve_cache_dir(options.cache_dir)
            .context("failed to resolve cache directory")?;

        let data_dir = BYTEPAIR_CACHE_CONFIG
            .resolve_data_dir(options.data_dir)
            .context("failed to resolve data directory")?;

        log::debug!(
            "disk cache: cache_dir={}, data_dir={}",
            cache_dir.display(),
            data_dir.display()
        );

        Ok(Self {
            cache_dir,
            data_dir,
            downloader: None,
            downloader_builder: options.downloader,
        })
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the cache path for the given key.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between `self.cache_dir` and `file`.
    /// * `file` - the final file name.
    pub fn cache_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        path_utils::extend_path(&self.cache_dir, context, file)
    }

    /// Get the data path for the given key.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between `self.data_dir` and `file`.
    /// * `file` - the final file name.
    pub fn data_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        path_utils::extend_path(&self.data_dir, context, file)
    }

    /// Find an existing copy of a file; the data directory first, then the cache.
    pub fn find_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> Option<PathBuf>
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        [
            self.data_path(context, file.as_ref()),
            self.cache_path(context, file.as_ref()),
        ]
        .into_iter()
        .find(|path| path.is_file())
    }

    fn downloader(&mut self) -> anyhow::Result<&mut Downloader> {
        if self.downloader.is_none() {
            let downloader = match self.downloader_builder {
                Some(builder) => builder(),
                None => Downloader::builder()
                    .build()
                    .context("failed to build downloader")?,
            };
            self.downloader = Some(downloader);
        }
        self.downloader
            .as_mut()
            .context("downloader is not initialized")
    }

    /// Loads a cached file, or downloads it if it does not exist.
    ///
    /// The file name is the final segment of the first URL.
    ///
    /// # Arguments
    /// * `context` - prefix dirs for the file, under either directory.
    /// * `urls` - mirror URLs to download the file from.
    /// * `download` - whether to download a missing file.
    ///
    /// # Returns
    /// The path of the existing or downloaded file.
    ///
    /// # Errors
    /// * The file is missing and `download` is `false`.
    /// * The download fails.
    pub fn load_cached_path<C, S>(
        &mut self,
        context: &[C],
        urls: &[S],
        download: bool,
    ) -> anyhow::Result<PathBuf>
    where
        C: AsRef<Path>,
        S: AsRef<str>,
    {
        let urls: Vec<&str> = urls.iter().map(|s| s.as_ref()).collect();
        let first = urls.first().context("no resource urls")?;
        let file_name = path_utils::url_file_name(first)
            .with_context(|| format!("no file name in url: {first}"))?;

        if let Some(path) = self.find_path(context, file_name) {
            return Ok(path);
        }

        let path = self.cache_path(context, file_name);
        if !download {
            anyhow::bail!("cached file not found: {}", path.display());
        }

        let parent = path
            .parent()
            .with_context(|| format!("no parent directory: {}", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        log::info!("downloading {file_name} to {}", path.display());
        let mut dl = Download::new_mirrored(&urls);
        dl.file_name = path.clone();

        for result in self.downloader()?.download(&[dl])? {
            result.with_context(|| format!("failed to download {file_name}"))?;
        }

        Ok(path)
    }
}
