//! # `bytepair` GPT-2 Tokenizer
//!
//! A byte-level BPE tokenizer which reproduces the classic GPT-2 tokenizer;
//! intended for estimating token usage of language-model requests.
//!
//! See:
//! * [`vocab`] to load the `encoder.json` / `vocab.bpe` vocabulary.
//! * [`pretokenize`] for the regex pre-tokenizer.
//! * [`bpe`] for the merge engine and its memo caches.
//! * [`tokenizer`] for the [`Gpt2Tokenizer`] encode / decode facade.
//! * [`usage`] to count the tokens of chat messages.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``download``
//!
//! * ``bytepair-disk-cache``
//!
//! The download feature enables fetching the GPT-2 resource files from the internet,
//! and caching them on disk.
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::CommonHash{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! This enables batch parallelism using the ``rayon`` crate.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Loading The GPT-2 Tokenizer
//!
//! ```rust,no_run
//! use bytepair::{Gpt2Tokenizer, TokenizerOptions, resources::DirectoryResources};
//!
//! fn example() -> bytepair::BpeResult<()> {
//!     let mut resources = DirectoryResources::from_env()?;
//!     let tokenizer: Gpt2Tokenizer<u32> =
//!         TokenizerOptions::default().load(&mut resources)?;
//!
//!     let tokens = tokenizer.encode("Hello world")?;
//!     assert_eq!(tokenizer.decode(&tokens)?, "Hello world");
//!     assert_eq!(tokenizer.token_count("Hello world")?, tokens.len());
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

#[cfg(feature = "download")]
#[doc(inline)]
pub use bytepair_disk_cache as disk_cache;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod bpe;
pub mod concurrency;
pub mod errors;
pub mod pretokenize;
pub mod regex;
pub mod resources;
pub mod tokenizer;
pub mod types;
pub mod usage;
pub mod vocab;

#[doc(inline)]
pub use errors::{BpeError, BpeResult, ErrorKind};
#[doc(inline)]
pub use tokenizer::{CachePolicy, Gpt2Tokenizer, StringIdTokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::{ByteUnicodeMapping, VocabularyStore};
