//! # Rayon Batch Parallelism
//!
//! Batch-level parallel encode / decode for [`Gpt2Tokenizer`];
//! used by [`Gpt2Tokenizer::encode_batch`] and [`Gpt2Tokenizer::decode_batch`].

use rayon::prelude::*;

use crate::{errors::BpeResult, tokenizer::Gpt2Tokenizer, types::TokenType};

/// Encode a batch of texts in parallel.
///
/// ## Returns
/// The token sequences, in batch order; or the first error encountered.
pub fn par_encode_batch<T, S>(
    tokenizer: &Gpt2Tokenizer<T>,
    batch: &[S],
) -> BpeResult<Vec<Vec<T>>>
where
    T: TokenType,
    S: AsRef<str> + Sync,
{
    batch
        .par_iter()
        .map(|text| tokenizer.encode(text.as_ref()))
        .collect()
}

/// Decode a batch of token sequences in parallel.
pub fn par_decode_batch<T, S>(
    tokenizer: &Gpt2Tokenizer<T>,
    batch: &[S],
) -> BpeResult<Vec<String>>
where
    T: TokenType,
    S: AsRef<[T]> + Sync,
{
    batch
        .par_iter()
        .map(|tokens| tokenizer.decode(tokens.as_ref()))
        .collect()
}

/// Count the tokens of a batch of texts in parallel.
pub fn par_token_counts<T, S>(
    tokenizer: &Gpt2Tokenizer<T>,
    batch: &[S],
) -> BpeResult<Vec<usize>>
where
    T: TokenType,
    S: AsRef<str> + Sync,
{
    batch
        .par_iter()
        .map(|text| tokenizer.token_count(text.as_ref()))
        .collect()
}
