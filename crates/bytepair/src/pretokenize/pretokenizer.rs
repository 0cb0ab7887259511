//! # Pretokenizer

use core::ops::Range;

use crate::{
    errors::{BpeError, BpeResult},
    pretokenize::GPT2_SCAN_PATTERN,
    regex::{RegexPattern, SplitRegex},
};

/// Span Label/Range Reference for [`Pretokenizer`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A regex match.
    Word(Range<usize>),

    /// Text between (or around) regex matches.
    Gap(Range<usize>),
}

impl From<SpanRef> for Range<usize> {
    fn from(span: SpanRef) -> Self {
        match span {
            SpanRef::Word(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

impl SpanRef {
    /// The byte range of the span.
    pub fn range(&self) -> &Range<usize> {
        match self {
            SpanRef::Word(range) => range,
            SpanRef::Gap(range) => range,
        }
    }

    /// Is this a [`SpanRef::Word`]?
    pub fn is_word(&self) -> bool {
        matches!(self, SpanRef::Word(_))
    }

    /// Slice the span out of the text it was split from.
    pub fn as_str<'t>(
        &self,
        text: &'t str,
    ) -> &'t str {
        &text[self.range().clone()]
    }
}

/// Regex-based text splitter.
///
/// The compiled regex is shared by every thread; cloning is cheap.
#[derive(Clone, Debug)]
pub struct Pretokenizer {
    /// Regex for splitting words.
    word_re: SplitRegex,

    /// Give back the last char of a whitespace run that stops before
    /// the end of the text.
    hold_back_whitespace: bool,
}

impl Pretokenizer {
    /// Build the GPT-2 [`Pretokenizer`].
    ///
    /// Chunks are those of [`GPT2_WORD_PATTERN`](super::GPT2_WORD_PATTERN);
    /// but the scan runs [`GPT2_SCAN_PATTERN`] on the linear-time engine, and
    /// applies the ``\s+(?!\S)`` rule by hand. A run of whitespace followed
    /// by more text keeps all but its last char; so `"a   b"` splits as
    /// `["a", "  ", " b"]`. Whitespace runs of any length are safe.
    pub fn gpt2() -> BpeResult<Self> {
        Ok(Self {
            word_re: GPT2_SCAN_PATTERN.compile()?,
            hold_back_whitespace: true,
        })
    }

    /// Build a [`Pretokenizer`] from a pattern.
    ///
    /// Matches are used as-is.
    ///
    /// ## Returns
    /// [`BpeError::Pattern`] if the pattern does not compile.
    pub fn from_pattern<P>(word_pattern: P) -> BpeResult<Self>
    where
        P: Into<RegexPattern>,
    {
        Ok(Self::new(word_pattern.into().compile()?))
    }

    /// Build a [`Pretokenizer`] from a compiled regex.
    pub fn new(word_re: SplitRegex) -> Self {
        Self {
            word_re,
            hold_back_whitespace: false,
        }
    }

    /// Get the span split regex.
    pub fn word_regex(&self) -> &SplitRegex {
        &self.word_re
    }

    /// Get the split pattern.
    pub fn pattern(&self) -> &str {
        self.word_re.as_str()
    }

    /// Visit every [`SpanRef`] of the text, in order.
    ///
    /// Spans are non-empty and tile the text exactly.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    /// * `f` - the function to apply to each span; an error halts the scan.
    ///
    /// ## Returns
    /// [`BpeError::Pretokenize`] if the regex fails at match time;
    /// or the first error returned by `f`.
    pub fn for_each_split_span<F>(
        &self,
        text: &str,
        mut f: F,
    ) -> BpeResult<()>
    where
        F: FnMut(SpanRef) -> BpeResult<()>,
    {
        let mut last = 0;
        let mut pos = 0;
        while pos < text.len() {
            let found = self
                .word_re
                .find_from(text, pos)
                .map_err(|e| BpeError::Pretokenize(e.to_string()))?;
            let Some(mut range) = found else {
                break;
            };

            if range.is_empty() {
                // Step over the char; empty matches carry no text.
                pos = range.start + text[range.start..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            if self.hold_back_whitespace {
                range.end = held_back_end(text, &range);
            }

            if last < range.start {
                f(SpanRef::Gap(last..range.start))?;
            }
            last = range.end;
            pos = range.end;
            f(SpanRef::Word(range))?;
        }
        if last < text.len() {
            f(SpanRef::Gap(last..text.len()))?;
        }
        Ok(())
    }

    /// Split the text into [`SpanRef`]s.
    pub fn split_spans(
        &self,
        text: &str,
    ) -> BpeResult<Vec<SpanRef>> {
        let mut spans = Vec::new();
        self.for_each_split_span(text, |span| {
            spans.push(span);
            Ok(())
        })?;
        Ok(spans)
    }

    /// Split the text into chunks.
    ///
    /// The concatenation of the chunks is the text.
    pub fn split<'t>(
        &self,
        text: &'t str,
    ) -> BpeResult<Vec<&'t str>> {
        let mut chunks = Vec::new();
        self.for_each_split_span(text, |span| {
            chunks.push(span.as_str(text));
            Ok(())
        })?;
        Ok(chunks)
    }
}

/// The end of a match, after the ``\s+(?!\S)`` rule.
///
/// A greedy whitespace match that stops short of the end of the text is
/// followed by non-whitespace; it keeps all but its last char, which
/// starts the next chunk. Single chars, and matches holding any
/// non-whitespace, are unchanged.
fn held_back_end(
    text: &str,
    range: &Range<usize>,
) -> usize {
    if range.end == text.len() {
        return range.end;
    }
    let run = &text[range.clone()];
    match run.char_indices().next_back() {
        Some((last, _)) if last > 0 && run.chars().all(char::is_whitespace) => range.start + last,
        _ => range.end,
    }
}
