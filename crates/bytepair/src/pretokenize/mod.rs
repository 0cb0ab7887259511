//! # Pre-Tokenization
//!
//! Text is split into chunks before byte-pair merging; merges never
//! cross a chunk boundary.
//!
//! * [`GPT2_WORD_PATTERN`] - the GPT-2 chunk pattern.
//! * [`GPT2_SCAN_PATTERN`] - the same, without its lookahead branch.
//! * [`Pretokenizer`] - splits text into [`SpanRef`]s; the spans always
//!   cover the whole text, so concatenating the chunks reproduces it.

pub mod patterns;
pub mod pretokenizer;

#[doc(inline)]
pub use patterns::{GPT2_SCAN_PATTERN, GPT2_WORD_PATTERN};
#[doc(inline)]
pub use pretokenizer::{Pretokenizer, SpanRef};
