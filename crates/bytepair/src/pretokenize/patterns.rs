//! # Patterns

use crate::{join_patterns, regex::RegexPattern};

/// The GPT-2 word pattern.
///
/// In priority order:
/// * the contractions ``'s 't 're 've 'm 'll 'd``;
/// * an optional space, then letters;
/// * an optional space, then numbers;
/// * an optional space, then other non-space chars;
/// * whitespace not followed by non-whitespace;
/// * whitespace.
///
/// The lookahead requires [`fancy_regex`], whose backtracking stack is
/// exhausted by very long whitespace runs; [`Pretokenizer::gpt2`] scans with
/// [`GPT2_SCAN_PATTERN`] instead, and yields the same chunks.
///
/// [`Pretokenizer::gpt2`]: crate::pretokenize::Pretokenizer::gpt2
pub const GPT2_WORD_PATTERN: RegexPattern = RegexPattern::fancy(join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+(?!\S)",
    r"\s+"
));

/// [`GPT2_WORD_PATTERN`] without the lookahead branch.
///
/// Runs on [`regex`]. A whitespace match that stops before the end of the
/// text must give its last char back to the next chunk; see
/// [`Pretokenizer::gpt2`](crate::pretokenize::Pretokenizer::gpt2).
pub const GPT2_SCAN_PATTERN: RegexPattern = RegexPattern::basic(join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+"
));
