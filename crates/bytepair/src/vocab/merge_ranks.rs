//! # Merge Rank Table
//!
//! ``{ (first, second) -> rank }``, where rank is the 0-based position
//! of the pair in the merge list. Lower ranks merge first.

use crate::{
    errors::{BpeError, BpeResult},
    types::CommonHashMap,
};

/// A merge pair of symbol strings.
pub type MergePair = (String, String);

/// Pair -> Rank table.
///
/// Stored as nested maps, ``first -> second -> rank``; so that lookups
/// take borrowed `&str` symbols without building a pair key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeRankTable {
    ranks: CommonHashMap<String, CommonHashMap<String, usize>>,
    len: usize,
}

impl MergeRankTable {
    /// Build the table by zipping the ordered pair list with its index.
    ///
    /// ## Returns
    /// [`BpeError::VocabConflict`] if any pair is listed twice.
    pub fn from_pairs<I>(pairs: I) -> BpeResult<Self>
    where
        I: IntoIterator<Item = MergePair>,
    {
        let mut table = Self::default();
        for (rank, (first, second)) in pairs.into_iter().enumerate() {
            if let Some(prev) = table.rank_of(&first, &second) {
                return Err(BpeError::VocabConflict(format!(
                    "merge pair ({first:?}, {second:?}) listed at rank {prev} and rank {rank}"
                )));
            }
            table.ranks.entry(first).or_default().insert(second, rank);
            table.len += 1;
        }
        Ok(table)
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the rank of `(first, second)`, if the pair is mergeable.
    #[inline(always)]
    pub fn rank_of(
        &self,
        first: &str,
        second: &str,
    ) -> Option<usize> {
        self.ranks.get(first)?.get(second).copied()
    }

    /// Iterate over ``(first, second, rank)``; in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.ranks.iter().flat_map(|(first, seconds)| {
            seconds
                .iter()
                .map(move |(second, &rank)| (first.as_str(), second.as_str(), rank))
        })
    }
}
