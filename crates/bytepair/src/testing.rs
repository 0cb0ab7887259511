//! # Test Utilities
//!
//! A tiny vocabulary with the shape of the GPT-2 vocabulary:
//! the 256 base symbols take ids ``0..256`` in GPT-2 order (so `"H"` is `39`
//! and `"Ġ"` is `220`, as in GPT-2); each [`TEST_MERGES`] result takes the
//! next id, in merge order; then [`TEST_END_OF_TEXT`].

use std::{path::Path, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    errors::BpeResult,
    tokenizer::{Gpt2Tokenizer, TokenizerOptions},
    types::TokenType,
    vocab::{
        ByteUnicodeMapping,
        TokenIdMap,
        VocabularyStore,
        io::{ENCODER_JSON, VOCAB_BPE},
    },
};

/// The merge list of the test vocabulary, in rank order.
pub const TEST_MERGES: &[(&str, &str)] = &[
    ("Ġ", "w"),
    ("l", "l"),
    ("e", "ll"),
    ("ell", "o"),
    ("h", "ello"),
    ("o", "r"),
    ("Ġw", "or"),
    ("l", "d"),
    ("Ġwor", "ld"),
    ("Ġ", "hello"),
];

/// The last token of the test vocabulary; an ordinary token.
pub const TEST_END_OF_TEXT: &str = "<|endoftext|>";

/// The ``{ token -> id }`` map of the test vocabulary.
pub fn test_token_map() -> TokenIdMap {
    let mut token_map = TokenIdMap::default();

    let mapping = ByteUnicodeMapping::default();
    for c in mapping.base_symbols() {
        let id = token_map.len() as u64;
        token_map.insert(c.to_string(), id);
    }
    for (first, second) in TEST_MERGES {
        let id = token_map.len() as u64;
        token_map.insert(format!("{first}{second}"), id);
    }
    let id = token_map.len() as u64;
    token_map.insert(TEST_END_OF_TEXT.to_string(), id);

    token_map
}

/// The `encoder.json` text of the test vocabulary.
pub fn test_encoder_json() -> String {
    let entries: Map<String, Value> = test_token_map()
        .into_iter()
        .map(|(token, id)| (token, Value::from(id)))
        .collect();
    Value::Object(entries).to_string()
}

/// The `vocab.bpe` text of the test vocabulary.
pub fn test_vocab_bpe() -> String {
    let mut text = String::from("#version: 0.2\n");
    for (first, second) in TEST_MERGES {
        text.push_str(first);
        text.push(' ');
        text.push_str(second);
        text.push('\n');
    }
    text
}

/// Write `encoder.json` and `vocab.bpe` for the test vocabulary into `dir`.
pub fn write_test_resources(dir: &Path) -> BpeResult<()> {
    std::fs::write(dir.join(ENCODER_JSON), test_encoder_json())?;
    std::fs::write(dir.join(VOCAB_BPE), test_vocab_bpe())?;
    Ok(())
}

/// Build the test [`VocabularyStore`].
pub fn build_test_vocab<T: TokenType>() -> VocabularyStore<T> {
    let merge_pairs = TEST_MERGES
        .iter()
        .map(|&(a, b)| (a.to_string(), b.to_string()))
        .collect();

    VocabularyStore::new(test_token_map(), merge_pairs).expect("the test vocabulary is valid")
}

/// Build a [`Gpt2Tokenizer`] over the test vocabulary.
pub fn build_test_tokenizer<T: TokenType>(options: TokenizerOptions) -> Gpt2Tokenizer<T> {
    options
        .build(Arc::new(build_test_vocab()))
        .expect("the test vocabulary is closed")
}

/// Compile-time check that a value is `Send + Sync`.
pub fn static_is_send_sync_check<T: Send + Sync>(_: &T) {}
