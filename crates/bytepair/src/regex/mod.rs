//! # Regex Utilities
//!
//! Split patterns run on the linear-time [`regex`] crate where they can;
//! patterns with look-around need the backtracking [`fancy_regex`] crate.
//!
//! * [`RegexPattern`] - a pattern labeled with its engine;
//!   [`RegexPattern::Adaptive`] tries [`regex`] first.
//! * [`SplitRegex`] - the compiled pattern, searched with
//!   [`SplitRegex::find_from`].

pub mod split_regex;

#[doc(inline)]
pub use split_regex::{RegexError, RegexPattern, SplitRegex};

/// A macro to concatenate multiple string literals with a specified separator.
///
/// ```rust
/// use bytepair::join_strs;
///
/// assert_eq!(join_strs!(",", ("Hello", "World")), "Hello,World");
/// assert_eq!(join_strs!(";", ("OnlyOne")), "OnlyOne");
/// ```
#[macro_export]
macro_rules! join_strs {
    ($sep:literal, ($first:literal $(, $rest:literal)* $(,)?)) => {
        concat!($first $(, $sep, $rest)*)
    };
}

/// An extension of [`join_strs!()`] which uses the "|" as the separator.
#[macro_export]
macro_rules! join_patterns {
    ($($e:literal),* $(,)?) => { $crate::join_strs!("|", ($($e),*)) };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_join_patterns() {
        assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
    }
}
