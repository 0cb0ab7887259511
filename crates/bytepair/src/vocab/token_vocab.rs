//! # Token Vocabulary
//!
//! ``{ String <-> T }`` bijection over dense ids ``0..N``.

use crate::{
    errors::{BpeError, BpeResult},
    types::{CommonHashMap, TokenType, token_from_u64},
};

/// `{ String -> u64 }` map, as read from `encoder.json`.
///
/// ## Style Hints
/// Instance names should prefer `token_map`.
pub type TokenIdMap = CommonHashMap<String, u64>;

/// Dense token string / id bijection.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenVocab<T: TokenType> {
    /// Forward table.
    token_ids: CommonHashMap<String, T>,

    /// Inverse table; position is the id.
    id_tokens: Vec<String>,
}

impl<T: TokenType> TokenVocab<T> {
    /// Build a vocabulary from a forward ``{ token -> id }`` map.
    ///
    /// The inverse table is derived; the ids must be exactly ``0..N``.
    ///
    /// ## Returns
    /// * [`BpeError::TokenOutOfRange`] if an id does not fit `T`.
    /// * [`BpeError::VocabConflict`] if an id is duplicated or the ids are not dense.
    pub fn from_token_map(token_map: TokenIdMap) -> BpeResult<Self> {
        let size = token_map.len();
        let mut id_slots: Vec<Option<String>> = vec![None; size];
        let mut token_ids: CommonHashMap<String, T> = CommonHashMap::with_capacity(size);

        for (token, id) in token_map {
            let token_id: T = token_from_u64(id)?;

            let slot = usize::try_from(id)
                .ok()
                .and_then(|idx| id_slots.get_mut(idx))
                .ok_or_else(|| {
                    BpeError::VocabConflict(format!(
                        "token id {id} for {token:?} is outside the dense range 0..{size}"
                    ))
                })?;

            if let Some(prev) = slot {
                return Err(BpeError::VocabConflict(format!(
                    "token id {id} is shared by {prev:?} and {token:?}"
                )));
            }
            *slot = Some(token.clone());
            token_ids.insert(token, token_id);
        }

        // `size` distinct ids, all below `size`: every slot is filled.
        let id_tokens = id_slots.into_iter().flatten().collect::<Vec<_>>();
        debug_assert_eq!(id_tokens.len(), size);

        Ok(Self {
            token_ids,
            id_tokens,
        })
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.id_tokens.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.id_tokens.is_empty()
    }

    /// Look up the id of a token string.
    #[inline(always)]
    pub fn id_of(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_ids.get(token).copied()
    }

    /// Look up the token string of an id.
    #[inline(always)]
    pub fn token_of(
        &self,
        id: T,
    ) -> Option<&str> {
        self.id_tokens.get(id.to_usize()?).map(String::as_str)
    }

    /// Iterate over ``(id, token)`` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.id_tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (id, token.as_str()))
    }
}
