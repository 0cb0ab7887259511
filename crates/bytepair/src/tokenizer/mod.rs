//! # Tokenizer
//!
//! * [`Gpt2Tokenizer`] - the encode / decode / count facade.
//! * [`TokenizerOptions`] - builds a [`Gpt2Tokenizer`] from a vocabulary.
//! * [`StringIdTokenizer`] - the same engine, with decimal string ids.

pub mod gpt2_tokenizer;
pub mod string_ids;
pub mod tokenizer_options;

#[doc(inline)]
pub use gpt2_tokenizer::Gpt2Tokenizer;
#[doc(inline)]
pub use string_ids::StringIdTokenizer;
#[doc(inline)]
pub use tokenizer_options::{CachePolicy, TokenizerOptions};
