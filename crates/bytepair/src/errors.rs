//! # Error Types

use std::path::PathBuf;

use crate::regex::RegexError;

/// Coarse classification of a [`BpeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A resource is missing, unreadable, or structurally invalid.
    ///
    /// Raised once, when constructing a vocabulary or tokenizer.
    Config,

    /// An internal invariant was violated while encoding.
    Algorithm,

    /// `decode` was given an id outside the vocabulary.
    UnknownTokenId,

    /// A token string contained a character outside the byte/unicode mapping.
    UnknownCodepoint,

    /// Decoded bytes were not valid UTF-8.
    InvalidUtf8,

    /// A caller-supplied value could not be parsed.
    Parse,
}

/// Errors from bytepair operations.
#[derive(Debug, thiserror::Error)]
pub enum BpeError {
    /// I/O error while reading a resource.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A resource file could not be located.
    #[error("resource not found: {}", path.display())]
    MissingResource {
        /// The path that was probed.
        path: PathBuf,
    },

    /// A resource file is structurally invalid.
    #[error("malformed {resource} (line {line}): {reason}")]
    MalformedResource {
        /// The resource name.
        resource: &'static str,

        /// The 1-based line number; 0 when unknown.
        line: usize,

        /// What was wrong.
        reason: String,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Token value out of range for the target type.
    #[error("token {value} out of range for token type")]
    TokenOutOfRange {
        /// The offending value.
        value: u64,
    },

    /// The pre-tokenizer pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] RegexError),

    /// A merged symbol has no vocabulary id.
    #[error("no vocabulary id for merged symbol {symbol:?}")]
    Algorithm {
        /// The symbol without an id.
        symbol: String,
    },

    /// The pre-tokenizer regex failed at match time.
    #[error("pre-tokenizer failure: {0}")]
    Pretokenize(String),

    /// A token id outside the loaded vocabulary.
    #[error("unknown token id: {id}")]
    UnknownTokenId {
        /// The unknown id.
        id: u64,
    },

    /// A character with no byte in the byte/unicode mapping.
    #[error("unknown codepoint: U+{codepoint:04X}")]
    UnknownCodepoint {
        /// The unknown codepoint.
        codepoint: u32,
    },

    /// Decoded bytes were not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// Error from an external component.
    #[error("{0}")]
    External(String),
}

impl BpeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        use BpeError::*;
        match self {
            Io(_)
            | MissingResource { .. }
            | MalformedResource { .. }
            | VocabConflict(_)
            | TokenOutOfRange { .. }
            | Pattern(_)
            | External(_) => ErrorKind::Config,
            Algorithm { .. } | Pretokenize(_) => ErrorKind::Algorithm,
            UnknownTokenId { .. } => ErrorKind::UnknownTokenId,
            UnknownCodepoint { .. } => ErrorKind::UnknownCodepoint,
            InvalidUtf8(_) => ErrorKind::InvalidUtf8,
            Parse(_) => ErrorKind::Parse,
        }
    }

    /// Is this a construction-time configuration error?
    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Config
    }
}

/// Result type for bytepair operations.
pub type BpeResult<T> = core::result::Result<T, BpeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = BpeError::MissingResource {
            path: PathBuf::from("/nowhere/encoder.json"),
        };
        assert!(err.is_config());
        assert_eq!(err.to_string(), "resource not found: /nowhere/encoder.json");

        let err = BpeError::MalformedResource {
            resource: "vocab.bpe",
            line: 3,
            reason: "expected 2 fields, found 1".to_string(),
        };
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "malformed vocab.bpe (line 3): expected 2 fields, found 1"
        );

        let err = BpeError::UnknownTokenId { id: 99 };
        assert_eq!(err.kind(), ErrorKind::UnknownTokenId);
        assert_eq!(err.to_string(), "unknown token id: 99");

        let err = BpeError::UnknownCodepoint { codepoint: 0x4e2d };
        assert_eq!(err.kind(), ErrorKind::UnknownCodepoint);
        assert_eq!(err.to_string(), "unknown codepoint: U+4E2D");

        let err = BpeError::Algorithm {
            symbol: "ab".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Algorithm);
        assert!(!err.is_config());
    }
}
