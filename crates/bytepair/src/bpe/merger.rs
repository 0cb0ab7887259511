//! # BPE Merger

use std::sync::Arc;

use crate::{
    bpe::{MergeCache, MergedSymbols},
    types::TokenType,
    vocab::VocabularyStore,
};

/// Greedy byte-pair merger over a [`VocabularyStore`] merge table.
///
/// Input is a *mapped* chunk: a string of byte/unicode symbols, one char per byte.
/// Each round merges every non-overlapping occurrence (left to right) of the
/// lowest-ranked adjacent pair; rounds repeat until no adjacent pair is in
/// the table, or a single symbol remains.
///
/// Results are memoized in the shared [`MergeCache`].
#[derive(Clone, Debug)]
pub struct BpeMerger<T: TokenType> {
    vocab: Arc<VocabularyStore<T>>,
    cache: Arc<dyn MergeCache>,
}

impl<T: TokenType> BpeMerger<T> {
    /// Build a merger.
    ///
    /// ## Arguments
    /// * `vocab` - the vocabulary supplying merge ranks.
    /// * `cache` - the memo cache; may be shared between mergers of the same vocabulary.
    pub fn new(
        vocab: Arc<VocabularyStore<T>>,
        cache: Arc<dyn MergeCache>,
    ) -> Self {
        Self { vocab, cache }
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<VocabularyStore<T>> {
        &self.vocab
    }

    /// The memo cache.
    pub fn cache(&self) -> &Arc<dyn MergeCache> {
        &self.cache
    }

    /// Merge a mapped chunk, consulting the cache.
    ///
    /// ## Returns
    /// The final symbols; their concatenation is `word`.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub fn merge(
        &self,
        word: &str,
    ) -> MergedSymbols {
        if let Some(symbols) = self.cache.get(word) {
            return symbols;
        }

        let symbols: MergedSymbols = self.merge_uncached(word).into();
        self.cache.insert(word, symbols.clone());
        symbols
    }

    /// Merge a mapped chunk; returning the concatenation of the final symbols.
    ///
    /// Merging never adds or drops chars, so this equals `word`; use
    /// [`BpeMerger::merge`] to see the symbol boundaries.
    pub fn merge_to_string(
        &self,
        word: &str,
    ) -> String {
        self.merge(word).concat()
    }

    /// Merge a mapped chunk, bypassing the cache.
    pub fn merge_uncached(
        &self,
        word: &str,
    ) -> Vec<String> {
        let mut symbols: Vec<String> = word.chars().map(String::from).collect();

        // At most `len - 1` rounds; each round shrinks `symbols`.
        while symbols.len() > 1 {
            let Some(idx) = self.best_pair_index(&symbols) else {
                break;
            };
            let first = symbols[idx].clone();
            let second = symbols[idx + 1].clone();

            let mut merged = Vec::with_capacity(symbols.len() - 1);
            let mut iter = symbols.into_iter().peekable();
            while let Some(symbol) = iter.next() {
                if symbol == first && iter.peek() == Some(&second) {
                    iter.next();
                    merged.push(symbol + &second);
                } else {
                    merged.push(symbol);
                }
            }
            symbols = merged;
        }

        symbols
    }

    /// Find the position of the lowest-ranked adjacent pair.
    ///
    /// ## Returns
    /// `None` when no adjacent pair is in the merge table.
    fn best_pair_index(
        &self,
        symbols: &[String],
    ) -> Option<usize> {
        // Pairs outside the table rank as +infinity.
        let (idx, rank) = symbols
            .windows(2)
            .enumerate()
            .map(|(idx, w)| (idx, self.vocab.rank_of(&w[0], &w[1]).unwrap_or(usize::MAX)))
            .min_by_key(|&(_, rank)| rank)?;

        if rank == usize::MAX {
            return None;
        }
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use super::*;
    use crate::{
        bpe::{LruMergeCache, NoMergeCache, UnboundedMergeCache},
        testing::build_test_vocab,
        vocab::{MergePair, TokenIdMap},
    };

    fn vocab_with_merges(merges: &[(&str, &str)]) -> Arc<VocabularyStore<u32>> {
        let merge_pairs: Vec<MergePair> = merges
            .iter()
            .map(|&(a, b)| (a.to_string(), b.to_string()))
            .collect();

        let mut token_map = TokenIdMap::default();
        for (a, b) in &merge_pairs {
            for token in [a.clone(), b.clone(), format!("{a}{b}")] {
                let next = token_map.len() as u64;
                token_map.entry(token).or_insert(next);
            }
        }

        Arc::new(VocabularyStore::new(token_map, merge_pairs).unwrap())
    }

    fn merger(merges: &[(&str, &str)]) -> BpeMerger<u32> {
        BpeMerger::new(vocab_with_merges(merges), Arc::new(NoMergeCache))
    }

    #[test]
    fn test_trivial_words() {
        let merger = merger(&[("a", "b")]);
        assert!(merger.merge_uncached("").is_empty());
        assert_eq!(merger.merge_uncached("x"), vec!["x"]);
        assert_eq!(merger.merge_uncached("xy"), vec!["x", "y"]);
        assert_eq!(merger.merge_uncached("ab"), vec!["ab"]);
    }

    #[test]
    fn test_rank_tie_break() {
        // Both (a, b) and (b, c) are eligible; the lower rank wins.
        let merger = merger(&[("b", "c"), ("a", "b")]);
        assert_eq!(merger.merge_uncached("abc"), vec!["a", "bc"]);

        let merger = self::merger(&[("a", "b"), ("b", "c")]);
        assert_eq!(merger.merge_uncached("abc"), vec!["ab", "c"]);
    }

    #[test]
    fn test_non_overlapping_pass() {
        let merger = merger(&[("a", "a")]);
        assert_eq!(merger.merge_uncached("aaa"), vec!["aa", "a"]);
        assert_eq!(merger.merge_uncached("aaaa"), vec!["aa", "aa"]);

        let merger = self::merger(&[("a", "a"), ("aa", "aa")]);
        assert_eq!(merger.merge_uncached("aaaa"), vec!["aaaa"]);
        assert_eq!(merger.merge_uncached("aaaaa"), vec!["aaaa", "a"]);
    }

    #[test]
    fn test_merge_chain() {
        let merger = BpeMerger::new(Arc::new(build_test_vocab::<u32>()), Arc::new(NoMergeCache));
        assert_eq!(merger.merge_uncached("Hello"), vec!["H", "ello"]);
        assert_eq!(merger.merge_uncached("hello"), vec!["hello"]);
        assert_eq!(merger.merge_uncached("Ġworld"), vec!["Ġworld"]);
        assert_eq!(merger.merge("Ġworlds").to_vec(), vec!["Ġworld", "s"]);
        assert_eq!(merger.merge_to_string("Ġworlds"), "Ġworlds");
        assert_eq!(merger.merge_to_string("Hello"), "Hello");
    }

    #[test]
    fn test_cache_transparency() {
        let vocab = Arc::new(build_test_vocab::<u32>());
        let caches: Vec<Arc<dyn MergeCache>> = vec![
            Arc::new(NoMergeCache),
            Arc::new(UnboundedMergeCache::new(NonZeroUsize::new(2))),
            Arc::new(LruMergeCache::new(NonZeroUsize::new(2).unwrap(), NonZeroUsize::new(1))),
        ];

        let words = ["hello", "Ġworld", "hello", "Ġhello", "xyz", "Ġworld"];
        for cache in caches {
            let merger = BpeMerger::new(vocab.clone(), cache);
            for word in words {
                let expected = merger.merge_uncached(word);
                assert_eq!(merger.merge(word).to_vec(), expected);
                assert_eq!(merger.merge(word).to_vec(), expected);
            }
        }
    }

    #[test]
    fn test_cache_is_populated() {
        let cache = Arc::new(UnboundedMergeCache::new(NonZeroUsize::new(1)));
        let merger = BpeMerger::new(Arc::new(build_test_vocab::<u32>()), cache.clone());

        let a = merger.merge("hello");
        assert_eq!(cache.len(), 1);
        let b = merger.merge("hello");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(merger.cache().len(), 1);
    }
}
