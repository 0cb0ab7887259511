//! # Byte-Pair Merging
//!
//! * [`BpeMerger`] - the greedy merge loop over a [`VocabularyStore`](crate::vocab::VocabularyStore).
//! * [`MergeCache`] - the shared memo cache; see [`LruMergeCache`],
//!   [`UnboundedMergeCache`], and [`NoMergeCache`].

pub mod cache;
pub mod merger;

#[doc(inline)]
pub use cache::{
    DEFAULT_LRU_CAPACITY,
    LruMergeCache,
    MergeCache,
    MergedSymbols,
    NoMergeCache,
    UnboundedMergeCache,
};
#[doc(inline)]
pub use merger::BpeMerger;
