//! # String Id Adapter
//!
//! Some callers exchange token ids as decimal strings.

use std::sync::Arc;

use crate::{
    errors::{BpeError, BpeResult},
    tokenizer::Gpt2Tokenizer,
    types::TokenType,
};

/// A [`Gpt2Tokenizer`] view speaking decimal string ids.
#[derive(Clone, Debug)]
pub struct StringIdTokenizer<T: TokenType = u32> {
    inner: Arc<Gpt2Tokenizer<T>>,
}

impl<T: TokenType> From<Gpt2Tokenizer<T>> for StringIdTokenizer<T> {
    fn from(inner: Gpt2Tokenizer<T>) -> Self {
        Self::new(Arc::new(inner))
    }
}

impl<T: TokenType> StringIdTokenizer<T> {
    /// Wrap a tokenizer.
    pub fn new(inner: Arc<Gpt2Tokenizer<T>>) -> Self {
        Self { inner }
    }

    /// Get the wrapped tokenizer.
    pub fn inner(&self) -> &Arc<Gpt2Tokenizer<T>> {
        &self.inner
    }

    /// Encode text to decimal string ids.
    pub fn encode(
        &self,
        text: &str,
    ) -> BpeResult<Vec<String>> {
        Ok(self
            .inner
            .encode(text)?
            .into_iter()
            .map(|token| token.to_string())
            .collect())
    }

    /// Decode decimal string ids.
    ///
    /// ## Returns
    /// * [`BpeError::Parse`] for an entry which is not a decimal integer.
    /// * [`BpeError::UnknownTokenId`] for an id outside the vocabulary.
    pub fn decode<S>(
        &self,
        ids: &[S],
    ) -> BpeResult<String>
    where
        S: AsRef<str>,
    {
        let tokens = ids
            .iter()
            .map(|id| parse_token(id.as_ref()))
            .collect::<BpeResult<Vec<T>>>()?;
        self.inner.decode(&tokens)
    }

    /// Count the tokens of `text`.
    pub fn token_count(
        &self,
        text: &str,
    ) -> BpeResult<usize> {
        self.inner.token_count(text)
    }
}

fn parse_token<T: TokenType>(id: &str) -> BpeResult<T> {
    let value: u64 = id
        .trim()
        .parse()
        .map_err(|e| BpeError::Parse(format!("invalid token id {id:?}: {e}")))?;

    // Too wide for `T` means outside any vocabulary `T` can hold.
    T::from_u64(value).ok_or(BpeError::UnknownTokenId { id: value })
}
