//! # GPT-2 Tokenizer

use std::sync::Arc;

use crate::{
    bpe::{BpeMerger, MergeCache},
    errors::{BpeError, BpeResult},
    pretokenize::Pretokenizer,
    types::{TokenType, token_to_u64},
    vocab::VocabularyStore,
};

/// Rough average of bytes per token, for buffer pre-allocation.
const EXPECTED_BYTES_PER_TOKEN: usize = 4;

/// Byte-level BPE tokenizer.
///
/// Combines:
///  * [`VocabularyStore`],
///  * [`Pretokenizer`], and
///  * [`BpeMerger`] over a shared [`MergeCache`].
///
/// Cheap to clone; all state is shared.
/// Build one with [`TokenizerOptions`](super::TokenizerOptions).
#[derive(Clone, Debug)]
pub struct Gpt2Tokenizer<T: TokenType = u32> {
    vocab: Arc<VocabularyStore<T>>,
    pretokenizer: Arc<Pretokenizer>,
    merger: BpeMerger<T>,
}

impl<T: TokenType> Gpt2Tokenizer<T> {
    /// Create a new tokenizer.
    pub fn new(
        vocab: Arc<VocabularyStore<T>>,
        pretokenizer: Arc<Pretokenizer>,
        cache: Arc<dyn MergeCache>,
    ) -> Self {
        let merger = BpeMerger::new(vocab.clone(), cache);
        Self {
            vocab,
            pretokenizer,
            merger,
        }
    }

    /// Get the underlying vocabulary.
    pub fn vocab(&self) -> &Arc<VocabularyStore<T>> {
        &self.vocab
    }

    /// Get the underlying pre-tokenizer.
    pub fn pretokenizer(&self) -> &Arc<Pretokenizer> {
        &self.pretokenizer
    }

    /// Get the underlying merger.
    pub fn merger(&self) -> &BpeMerger<T> {
        &self.merger
    }

    /// Get the merge cache.
    pub fn cache(&self) -> &Arc<dyn MergeCache> {
        self.merger.cache()
    }

    fn lookup(
        &self,
        symbol: &str,
    ) -> BpeResult<T> {
        self.vocab
            .id_of(symbol)
            .ok_or_else(|| BpeError::Algorithm {
                symbol: symbol.to_string(),
            })
    }

    /// Visit the merged symbols of each chunk of `text`, in order.
    fn for_each_merged_symbol<F>(
        &self,
        text: &str,
        mut f: F,
    ) -> BpeResult<()>
    where
        F: FnMut(&str) -> BpeResult<()>,
    {
        let mapping = self.vocab.byte_mapping();
        let mut word = String::new();

        self.pretokenizer.for_each_split_span(text, |span| {
            word.clear();
            mapping.append_mapped(span.as_str(text).as_bytes(), &mut word);

            for symbol in self.merger.merge(&word).iter() {
                f(symbol)?;
            }
            Ok(())
        })
    }

    /// Encode text, appending to a target buffer.
    ///
    /// ## Returns
    /// [`BpeError::Algorithm`] if a merged symbol has no id;
    /// `tokens` may have been partially extended.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, text, tokens))
    )]
    pub fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> BpeResult<()> {
        self.for_each_merged_symbol(text, |symbol| {
            tokens.push(self.lookup(symbol)?);
            Ok(())
        })
    }

    /// Encode text to token ids.
    pub fn encode(
        &self,
        text: &str,
    ) -> BpeResult<Vec<T>> {
        let mut tokens = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_TOKEN + 1);
        self.encode_append(text, &mut tokens)?;
        Ok(tokens)
    }

    /// Count the tokens of `text`.
    ///
    /// Always equal to ``encode(text)?.len()``.
    pub fn token_count(
        &self,
        text: &str,
    ) -> BpeResult<usize> {
        let mut count = 0;
        self.for_each_merged_symbol(text, |symbol| {
            self.lookup(symbol)?;
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }

    /// Decode token ids to their exact bytes.
    ///
    /// ## Returns
    /// * [`BpeError::UnknownTokenId`] for an id outside the vocabulary.
    /// * [`BpeError::UnknownCodepoint`] for a token holding a char outside the byte mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, tokens))
    )]
    pub fn decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> BpeResult<Vec<u8>> {
        let mapping = self.vocab.byte_mapping();
        let mut buf = Vec::with_capacity(tokens.len() * EXPECTED_BYTES_PER_TOKEN);

        for &token in tokens {
            let symbols = self
                .vocab
                .token_of(token)
                .ok_or(BpeError::UnknownTokenId {
                    id: token_to_u64(token),
                })?;
            mapping.append_unmapped(symbols, &mut buf)?;
        }

        Ok(buf)
    }

    /// Decode token ids to a string.
    ///
    /// Byte sequences which are not valid UTF-8 (a slice which cuts a
    /// multi-byte char) are replaced with `U+FFFD`.
    pub fn decode(
        &self,
        tokens: &[T],
    ) -> BpeResult<String> {
        let buf = self.decode_to_bytes(tokens)?;
        Ok(match String::from_utf8(buf) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Decode token ids to a string; failing on invalid UTF-8.
    ///
    /// ## Returns
    /// [`BpeError::InvalidUtf8`] if the bytes are not valid UTF-8.
    pub fn decode_strict(
        &self,
        tokens: &[T],
    ) -> BpeResult<String> {
        Ok(String::from_utf8(self.decode_to_bytes(tokens)?)?)
    }

    /// Encode a batch of texts.
    ///
    /// Parallel under the `rayon` feature.
    pub fn encode_batch<S>(
        &self,
        batch: &[S],
    ) -> BpeResult<Vec<Vec<T>>>
    where
        S: AsRef<str> + Sync,
    {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                crate::rayon::par_encode_batch(self, batch)
            } else {
                batch.iter().map(|text| self.encode(text.as_ref())).collect()
            }
        }
    }

    /// Decode a batch of token sequences.
    ///
    /// Parallel under the `rayon` feature.
    pub fn decode_batch<S>(
        &self,
        batch: &[S],
    ) -> BpeResult<Vec<String>>
    where
        S: AsRef<[T]> + Sync,
    {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                crate::rayon::par_decode_batch(self, batch)
            } else {
                batch.iter().map(|tokens| self.decode(tokens.as_ref())).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        ErrorKind,
        bpe::NoMergeCache,
        testing::{TEST_END_OF_TEXT, build_test_tokenizer, build_test_vocab, static_is_send_sync_check},
        tokenizer::{CachePolicy, TokenizerOptions},
    };

    fn tokenizer() -> Gpt2Tokenizer<u32> {
        build_test_tokenizer(TokenizerOptions::default())
    }

    #[test]
    fn test_encode() {
        let tokenizer = tokenizer();
        static_is_send_sync_check(&tokenizer);

        // "Hello" -> ["H", "ello"]; " world" -> ["Ġworld"].
        assert_eq!(tokenizer.encode("Hello world").unwrap(), vec![39, 259, 264]);
        assert_eq!(tokenizer.encode("hello hello").unwrap(), vec![260, 265]);
        assert_eq!(tokenizer.token_count("Hello world").unwrap(), 3);

        let mut tokens = vec![7];
        tokenizer.encode_append("hello", &mut tokens).unwrap();
        assert_eq!(tokens, vec![7, 260]);
    }

    #[test]
    fn test_empty() {
        let tokenizer = tokenizer();
        assert!(tokenizer.encode("").unwrap().is_empty());
        assert_eq!(tokenizer.token_count("").unwrap(), 0);
        assert_eq!(tokenizer.decode(&[]).unwrap(), "");
    }

    #[test]
    fn test_decode() {
        let tokenizer = tokenizer();
        assert_eq!(tokenizer.decode(&[39, 259, 264]).unwrap(), "Hello world");
        assert_eq!(tokenizer.decode(&[266]).unwrap(), TEST_END_OF_TEXT);

        // Base ids decode to their bytes: 220 is "Ġ" -> b' '; 198 is "Ċ" -> b'\n'.
        assert_eq!(tokenizer.decode_to_bytes(&[220, 198]).unwrap(), b" \n");
    }

    #[test]
    fn test_decode_unknown_id() {
        let tokenizer = tokenizer();
        let err = tokenizer.decode(&[39, 50_000]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownTokenId);
        assert_eq!(err.to_string(), "unknown token id: 50000");
    }

    #[test]
    fn test_decode_partial_utf8() {
        let tokenizer = tokenizer();

        // "é" is two bytes, so two base tokens.
        let tokens = tokenizer.encode("é").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "é");

        assert_eq!(tokenizer.decode(&tokens[..1]).unwrap(), "\u{FFFD}");
        let err = tokenizer.decode_strict(&tokens[..1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
        assert_eq!(tokenizer.decode_strict(&tokens).unwrap(), "é");
    }

    #[test]
    fn test_unknown_codepoint_in_vocab() {
        // A vocabulary entry holding a char outside the byte mapping.
        let mut token_map = crate::testing::test_token_map();
        let id = token_map.len() as u64;
        token_map.insert("中".to_string(), id);
        let vocab: VocabularyStore<u32> = VocabularyStore::new(token_map, vec![]).unwrap();

        let tokenizer = TokenizerOptions::default()
            .with_validation(false)
            .build(Arc::new(vocab))
            .unwrap();
        let err = tokenizer.decode(&[id as u32]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCodepoint);
    }

    #[test]
    fn test_algorithm_error() {
        // Merges without result tokens; validation disabled.
        let token_map = crate::testing::test_token_map();
        let vocab: VocabularyStore<u32> =
            VocabularyStore::new(token_map, vec![("x".to_string(), "y".to_string())]).unwrap();
        assert!(vocab.validate().is_err());

        let tokenizer = TokenizerOptions::default()
            .with_validation(false)
            .build(Arc::new(vocab))
            .unwrap();
        assert_eq!(tokenizer.encode("ab").unwrap(), vec![64, 65]);

        let err = tokenizer.encode("xy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Algorithm);
        assert!(tokenizer.token_count("xy").is_err());
    }

    #[test]
    fn test_batch() {
        let tokenizer = tokenizer();
        let batch = ["Hello world", "", "hello"];
        let tokens = tokenizer.encode_batch(&batch).unwrap();
        assert_eq!(tokens, vec![vec![39, 259, 264], vec![], vec![260]]);
        assert_eq!(tokenizer.decode_batch(&tokens).unwrap(), batch);
    }

    #[test]
    fn test_shared_cache() {
        let tokenizer = tokenizer();
        tokenizer.encode("hello world").unwrap();
        assert!(!tokenizer.cache().is_empty());

        let clone = tokenizer.clone();
        assert!(Arc::ptr_eq(clone.cache(), tokenizer.cache()));
        assert!(Arc::ptr_eq(clone.vocab(), tokenizer.vocab()));
    }

    #[test]
    fn test_cache_policies_agree() {
        let text = "hello Hello world, hello worlds! 123 \n\n  ok";
        let expected = Gpt2Tokenizer::new(
            Arc::new(build_test_vocab::<u32>()),
            Arc::new(Pretokenizer::gpt2().unwrap()),
            Arc::new(NoMergeCache),
        )
        .encode(text)
        .unwrap();

        for policy in [
            CachePolicy::default(),
            CachePolicy::Unbounded,
            CachePolicy::Disabled,
            CachePolicy::lru(1),
        ] {
            let tokenizer: Gpt2Tokenizer<u32> =
                build_test_tokenizer(TokenizerOptions::default().with_cache(policy));
            assert_eq!(tokenizer.encode(text).unwrap(), expected);
            assert_eq!(tokenizer.encode(text).unwrap(), expected);
        }
    }

    #[test]
    fn test_long_whitespace_run() {
        let tokenizer = tokenizer();
        let text = format!("a{}b", " ".repeat(2_000_000));

        let tokens = tokenizer.encode(&text).unwrap();
        assert_eq!(tokens.len(), 2_000_002);
        assert_eq!(tokens[0], 64);
        assert!(tokens[1..2_000_000].iter().all(|&t| t == 220));
        assert_eq!(&tokens[2_000_000..], &[220, 65]);
        assert_eq!(tokenizer.decode_strict(&tokens).unwrap(), text);
    }

    proptest! {
        #[test]
        fn test_round_trip(text in any::<String>()) {
            let tokenizer = tokenizer();
            let tokens = tokenizer.encode(&text).unwrap();
            prop_assert_eq!(tokenizer.token_count(&text).unwrap(), tokens.len());
            prop_assert_eq!(tokenizer.decode_strict(&tokens).unwrap(), text);
        }
    }
}
