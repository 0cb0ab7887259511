//! # Vocabulary Store

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use crate::{
    errors::{BpeError, BpeResult},
    resources::{GPT2_ENCODER_JSON_KEYED_RESOURCE, GPT2_VOCAB_BPE_KEYED_RESOURCE, ResourceLoader},
    types::TokenType,
    vocab::{
        ByteUnicodeMapping,
        MergeRankTable,
        TokenVocab,
        io::{ENCODER_JSON, VOCAB_BPE, read_encoder_json, read_vocab_bpe},
        merge_ranks::MergePair,
        token_vocab::TokenIdMap,
    },
};

/// Open a resource file; a missing file is reported as [`BpeError::MissingResource`].
fn open_resource(path: &Path) -> BpeResult<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(BpeError::MissingResource {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// The immutable GPT-2 vocabulary.
///
/// Holds:
/// * the [`ByteUnicodeMapping`],
/// * the ``{ token <-> id }`` [`TokenVocab`],
/// * the ``{ (first, second) -> rank }`` [`MergeRankTable`].
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyStore<T: TokenType = u32> {
    mapping: ByteUnicodeMapping,
    tokens: TokenVocab<T>,
    merges: MergeRankTable,
}

impl<T: TokenType> VocabularyStore<T> {
    /// Build a store from parsed resources.
    ///
    /// ## Arguments
    /// * `token_map` - the ``{ token -> id }`` map; ids must be dense.
    /// * `merge_pairs` - the merge pairs, in priority order.
    pub fn new(
        token_map: TokenIdMap,
        merge_pairs: Vec<MergePair>,
    ) -> BpeResult<Self> {
        let tokens = TokenVocab::from_token_map(token_map)?;
        let merges = MergeRankTable::from_pairs(merge_pairs)?;

        log::info!(
            "loaded BPE vocabulary: {} tokens, {} merges",
            tokens.len(),
            merges.len()
        );

        Ok(Self {
            mapping: ByteUnicodeMapping::default(),
            tokens,
            merges,
        })
    }

    /// Build a store from `encoder.json` and `vocab.bpe` readers.
    pub fn from_readers<E, M>(
        encoder_json_reader: E,
        vocab_bpe_reader: M,
    ) -> BpeResult<Self>
    where
        E: Read,
        M: BufRead,
    {
        let token_map = read_encoder_json(encoder_json_reader)?;
        let merge_pairs = read_vocab_bpe(vocab_bpe_reader)?;
        Self::new(token_map, merge_pairs)
    }

    /// Build a store from `encoder.json` and `vocab.bpe` file paths.
    pub fn from_paths<P, Q>(
        encoder_json_path: P,
        vocab_bpe_path: Q,
    ) -> BpeResult<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let encoder_json_path = encoder_json_path.as_ref();
        let vocab_bpe_path = vocab_bpe_path.as_ref();
        log::debug!(
            "reading {} and {}",
            encoder_json_path.display(),
            vocab_bpe_path.display()
        );

        Self::from_readers(
            open_resource(encoder_json_path)?,
            open_resource(vocab_bpe_path)?,
        )
    }

    /// Build a store from a directory holding `encoder.json` and `vocab.bpe`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> BpeResult<Self> {
        let dir = dir.as_ref();
        Self::from_paths(dir.join(ENCODER_JSON), dir.join(VOCAB_BPE))
    }

    /// Load the GPT-2 resources through a [`ResourceLoader`].
    pub fn load(loader: &mut dyn ResourceLoader) -> BpeResult<Self> {
        let encoder_json_path = loader.load_resource_path(&GPT2_ENCODER_JSON_KEYED_RESOURCE)?;
        let vocab_bpe_path = loader.load_resource_path(&GPT2_VOCAB_BPE_KEYED_RESOURCE)?;
        Self::from_paths(encoder_json_path, vocab_bpe_path)
    }

    /// Check that the vocabulary is closed under the merge table.
    ///
    /// Every base symbol, and every merge result ``first + second``,
    /// must have a token id.
    ///
    /// ## Returns
    /// [`BpeError::VocabConflict`] naming the first missing symbol.
    pub fn validate(&self) -> BpeResult<()> {
        let mut buf = String::new();
        for c in self.mapping.base_symbols() {
            buf.clear();
            buf.push(c);
            if self.id_of(&buf).is_none() {
                return Err(BpeError::VocabConflict(format!(
                    "base symbol {c:?} has no token id"
                )));
            }
        }

        for (first, second, rank) in self.merges.iter() {
            buf.clear();
            buf.push_str(first);
            buf.push_str(second);
            if self.id_of(&buf).is_none() {
                return Err(BpeError::VocabConflict(format!(
                    "merge result {buf:?} (rank {rank}) has no token id"
                )));
            }
        }

        Ok(())
    }

    /// The byte/unicode mapping.
    pub fn byte_mapping(&self) -> &ByteUnicodeMapping {
        &self.mapping
    }

    /// The token table.
    pub fn token_vocab(&self) -> &TokenVocab<T> {
        &self.tokens
    }

    /// The merge rank table.
    pub fn merge_ranks(&self) -> &MergeRankTable {
        &self.merges
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Look up the id of a token string.
    #[inline(always)]
    pub fn id_of(
        &self,
        token: &str,
    ) -> Option<T> {
        self.tokens.id_of(token)
    }

    /// Look up the token string of an id.
    #[inline(always)]
    pub fn token_of(
        &self,
        id: T,
    ) -> Option<&str> {
        self.tokens.token_of(id)
    }

    /// Get the rank of the merge pair ``(first, second)``.
    #[inline(always)]
    pub fn rank_of(
        &self,
        first: &str,
        second: &str,
    ) -> Option<usize> {
        self.merges.rank_of(first, second)
    }
}
