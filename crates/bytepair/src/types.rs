//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

use crate::errors::{BpeError, BpeResult};

/// A type that can be used as a token id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the max token in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// Convert a `u64` id into `T`.
///
/// ## Returns
/// [`BpeError::TokenOutOfRange`] if the value does not fit.
pub fn token_from_u64<T: TokenType>(value: u64) -> BpeResult<T> {
    T::from_u64(value).ok_or(BpeError::TokenOutOfRange { value })
}

/// Widen a token to `u64`; used for error reporting.
pub fn token_to_u64<T: TokenType>(token: T) -> u64 {
    // Every supported `TokenType` is at most 64 bits wide.
    token.to_u64().unwrap_or(u64::MAX)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type CommonHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type CommonHashSet<V> = ahash::AHashSet<V>;

        /// Type Alias for the hash builder used by [`CommonHashMap`].
        pub type CommonHashBuilder = ahash::RandomState;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type CommonHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type CommonHashSet<V> = std::collections::HashSet<V>;

        /// Type Alias for the hash builder used by [`CommonHashMap`].
        pub type CommonHashBuilder = std::collections::hash_map::RandomState;
    }
}
