//! # Vocabulary
//!
//! The immutable tables a GPT-2 style tokenizer runs on:
//! * [`ByteUnicodeMapping`] - the byte <-> printable char bijection.
//! * [`TokenVocab`] - the dense token string <-> id table, from `encoder.json`.
//! * [`MergeRankTable`] - the ranked merge pairs, from `vocab.bpe`.
//!
//! [`VocabularyStore`] bundles the three.

pub mod byte_unicode;
pub mod io;
pub mod merge_ranks;
pub mod token_vocab;
pub mod vocabulary_store;

#[doc(inline)]
pub use byte_unicode::ByteUnicodeMapping;
#[doc(inline)]
pub use merge_ranks::{MergePair, MergeRankTable};
#[doc(inline)]
pub use token_vocab::{TokenIdMap, TokenVocab};
#[doc(inline)]
pub use vocabulary_store::VocabularyStore;
