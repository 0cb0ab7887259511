//! # Split Regex
//!
//! A compiled split pattern on either engine, searched one match at a time.

use std::{borrow::Cow, ops::Range};

/// Compile error from either regex engine.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RegexError {
    /// Error from [`regex`].
    #[error(transparent)]
    Basic(#[from] regex::Error),

    /// Error from [`fancy_regex`].
    #[error(transparent)]
    Fancy(#[from] fancy_regex::Error),
}

/// A split pattern, labeled with the engine it was written for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RegexPattern {
    /// A pattern for [`regex`]; linear time, no look-around.
    Basic(Cow<'static, str>),

    /// A pattern for [`fancy_regex`]; backtracking, with look-around.
    Fancy(Cow<'static, str>),

    /// Try [`regex`] first; fall back to [`fancy_regex`].
    Adaptive(Cow<'static, str>),
}

impl From<&str> for RegexPattern {
    fn from(pattern: &str) -> Self {
        Self::Adaptive(Cow::Owned(pattern.to_string()))
    }
}

impl From<String> for RegexPattern {
    fn from(pattern: String) -> Self {
        Self::Adaptive(Cow::Owned(pattern))
    }
}

impl RegexPattern {
    /// A static [`RegexPattern::Basic`].
    pub const fn basic(pattern: &'static str) -> Self {
        Self::Basic(Cow::Borrowed(pattern))
    }

    /// A static [`RegexPattern::Fancy`].
    pub const fn fancy(pattern: &'static str) -> Self {
        Self::Fancy(Cow::Borrowed(pattern))
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(pattern) | Self::Fancy(pattern) | Self::Adaptive(pattern) => pattern,
        }
    }

    /// Compile the pattern.
    ///
    /// An [`RegexPattern::Adaptive`] pattern which neither engine accepts
    /// reports the [`fancy_regex`] error.
    pub fn compile(&self) -> Result<SplitRegex, RegexError> {
        Ok(match self {
            Self::Basic(pattern) => SplitRegex::Basic(regex::Regex::new(pattern)?),
            Self::Fancy(pattern) => SplitRegex::Fancy(fancy_regex::Regex::new(pattern)?),
            Self::Adaptive(pattern) => match regex::Regex::new(pattern) {
                Ok(re) => SplitRegex::Basic(re),
                Err(_) => SplitRegex::Fancy(fancy_regex::Regex::new(pattern)?),
            },
        })
    }
}

/// A compiled split pattern.
///
/// Both engines are `Send + Sync` and clone cheaply, so one instance
/// serves every thread.
#[derive(Debug, Clone)]
pub enum SplitRegex {
    /// A [`regex`] regex.
    Basic(regex::Regex),

    /// A [`fancy_regex`] regex.
    Fancy(fancy_regex::Regex),
}

impl SplitRegex {
    /// Is this backed by [`regex`]?
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic(_))
    }

    /// Is this backed by [`fancy_regex`]?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(re) => re.as_str(),
            Self::Fancy(re) => re.as_str(),
        }
    }

    /// Find the leftmost match starting at or after `start`.
    ///
    /// `start` must be a char boundary of `haystack`. Text before `start`
    /// is still visible to anchors and look-behind.
    ///
    /// ## Returns
    /// The byte range of the match; or a [`fancy_regex`] runtime error,
    /// such as an exhausted backtracking budget.
    pub fn find_from(
        &self,
        haystack: &str,
        start: usize,
    ) -> Result<Option<Range<usize>>, RegexError> {
        match self {
            Self::Basic(re) => Ok(re.find_at(haystack, start).map(|m| m.range())),
            Self::Fancy(re) => Ok(re.find_from_pos(haystack, start)?.map(|m| m.range())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptive_pattern() {
        let basic = RegexPattern::from(r"\w+").compile().unwrap();
        assert!(basic.is_basic());
        assert_eq!(basic.as_str(), r"\w+");

        // Lookahead is only supported by `fancy_regex`.
        let fancy = RegexPattern::from(r"\s+(?!\S)").compile().unwrap();
        assert!(fancy.is_fancy());
    }

    #[test]
    fn test_find_from() {
        let text = "ab  cd";
        for pattern in [RegexPattern::basic(r"\S+"), RegexPattern::fancy(r"\S+")] {
            let re = pattern.compile().unwrap();
            assert_eq!(re.find_from(text, 0).unwrap(), Some(0..2));
            assert_eq!(re.find_from(text, 1).unwrap(), Some(1..2));
            assert_eq!(re.find_from(text, 2).unwrap(), Some(4..6));
            assert_eq!(re.find_from(text, 6).unwrap(), None);
        }
    }

    #[test]
    fn test_find_from_sees_prefix() {
        let re = RegexPattern::basic(r"\bcd").compile().unwrap();
        assert_eq!(re.find_from("abcd cd", 2).unwrap(), Some(5..7));
    }

    #[test]
    fn test_compile_error() {
        let err = RegexPattern::fancy("(unclosed").compile().unwrap_err();
        assert!(matches!(err, RegexError::Fancy(_)));
        assert!(!err.to_string().is_empty());

        let err = RegexPattern::basic(r"\s+(?!\S)").compile().unwrap_err();
        assert!(matches!(err, RegexError::Basic(_)));

        let err = RegexPattern::from("(unclosed").compile().unwrap_err();
        assert!(matches!(err, RegexError::Fancy(_)));
    }
}
