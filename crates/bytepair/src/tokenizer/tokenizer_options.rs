//! # Tokenizer Options

use core::num::NonZeroUsize;
use std::sync::Arc;

use crate::{
    bpe::{DEFAULT_LRU_CAPACITY, LruMergeCache, MergeCache, NoMergeCache, UnboundedMergeCache},
    errors::BpeResult,
    pretokenize::Pretokenizer,
    resources::ResourceLoader,
    tokenizer::Gpt2Tokenizer,
    types::TokenType,
    vocab::VocabularyStore,
};

/// Merge cache selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// A bounded [`LruMergeCache`].
    Lru {
        /// The total entry budget.
        capacity: NonZeroUsize,
    },

    /// An [`UnboundedMergeCache`]; memory grows with the number of distinct chunks seen.
    Unbounded,

    /// No caching; every chunk is merged from scratch.
    Disabled,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::Lru {
            capacity: DEFAULT_LRU_CAPACITY,
        }
    }
}

impl CachePolicy {
    /// An LRU policy; a `capacity` of 0 is treated as 1.
    pub fn lru(capacity: usize) -> Self {
        Self::Lru {
            capacity: NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Build a cache for this policy.
    ///
    /// ## Arguments
    /// * `shards` - the number of cache shards; if None, lib defaults are used.
    pub fn build_cache(
        &self,
        shards: Option<NonZeroUsize>,
    ) -> Arc<dyn MergeCache> {
        match *self {
            Self::Lru { capacity } => Arc::new(LruMergeCache::new(capacity, shards)),
            Self::Unbounded => Arc::new(UnboundedMergeCache::new(shards)),
            Self::Disabled => Arc::new(NoMergeCache),
        }
    }
}

/// Options for configuring a [`Gpt2Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// The merge cache policy.
    pub cache: CachePolicy,

    /// The number of merge cache shards; if None, lib defaults are used.
    pub cache_shards: Option<NonZeroUsize>,

    /// Check vocabulary closure before building.
    pub validate: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            cache: CachePolicy::default(),
            cache_shards: None,
            validate: true,
        }
    }
}

impl TokenizerOptions {
    /// Sets the merge cache policy.
    pub fn with_cache(
        mut self,
        cache: CachePolicy,
    ) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the number of merge cache shards.
    pub fn with_cache_shards(
        mut self,
        cache_shards: Option<NonZeroUsize>,
    ) -> Self {
        self.cache_shards = cache_shards;
        self
    }

    /// Sets whether vocabulary closure is checked before building.
    pub fn with_validation(
        mut self,
        validate: bool,
    ) -> Self {
        self.validate = validate;
        self
    }

    /// Build a [`Gpt2Tokenizer`] for the given vocab.
    ///
    /// ## Returns
    /// [`BpeError::VocabConflict`](crate::BpeError::VocabConflict) if validation
    /// is enabled and the vocabulary is not closed under its merges.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<VocabularyStore<T>>,
    ) -> BpeResult<Gpt2Tokenizer<T>> {
        if self.validate {
            if let Err(e) = vocab.validate() {
                log::warn!("rejecting vocabulary: {e}");
                return Err(e);
            }
        } else {
            log::debug!("vocabulary validation disabled");
        }

        let pretokenizer = Pretokenizer::gpt2()?;
        let cache = self.cache.build_cache(self.cache_shards);
        log::debug!("building tokenizer: cache={:?}", self.cache);

        Ok(Gpt2Tokenizer::new(vocab, Arc::new(pretokenizer), cache))
    }

    /// Load the GPT-2 vocabulary through a [`ResourceLoader`], and build a [`Gpt2Tokenizer`].
    pub fn load<T: TokenType>(
        &self,
        loader: &mut dyn ResourceLoader,
    ) -> BpeResult<Gpt2Tokenizer<T>> {
        let vocab = VocabularyStore::load(loader)?;
        self.build(Arc::new(vocab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{build_test_vocab, test_token_map};

    #[test]
    fn test_defaults() {
        let options = TokenizerOptions::default();
        assert!(options.validate);
        assert_eq!(
            options.cache,
            CachePolicy::Lru {
                capacity: NonZeroUsize::new(65_536).unwrap()
            }
        );
        assert_eq!(options.cache_shards, None);
    }

    #[test]
    fn test_builders() {
        let options = TokenizerOptions::default()
            .with_cache(CachePolicy::Unbounded)
            .with_cache_shards(NonZeroUsize::new(3))
            .with_validation(false);

        assert_eq!(options.cache, CachePolicy::Unbounded);
        assert_eq!(options.cache_shards, NonZeroUsize::new(3));
        assert!(!options.validate);

        assert_eq!(CachePolicy::lru(0), CachePolicy::lru(1));
    }

    #[test]
    fn test_build_cache() {
        let cache = CachePolicy::Disabled.build_cache(None);
        cache.insert("a", vec!["a".to_string()].into());
        assert!(cache.is_empty());

        let cache = CachePolicy::lru(4).build_cache(NonZeroUsize::new(1));
        for key in ["a", "b", "c", "d", "e"] {
            cache.insert(key, vec![key.to_string()].into());
        }
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_build_validates() {
        let vocab: Arc<VocabularyStore<u32>> = Arc::new(build_test_vocab());
        assert!(TokenizerOptions::default().build(vocab).is_ok());

        let vocab: Arc<VocabularyStore<u32>> = Arc::new(
            VocabularyStore::new(test_token_map(), vec![("x".to_string(), "y".to_string())])
                .unwrap(),
        );
        let err = TokenizerOptions::default().build(vocab.clone()).unwrap_err();
        assert!(err.is_config());

        assert!(
            TokenizerOptions::default()
                .with_validation(false)
                .build(vocab)
                .is_ok()
        );
    }
}
