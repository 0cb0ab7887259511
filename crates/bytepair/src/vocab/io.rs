//! # Vocabulary IO
//!
//! Readers for the two GPT-2 resource formats:
//! * `encoder.json` - a JSON object of ``{ token: id }``.
//! * `vocab.bpe` - a header line, then one ``first second`` merge pair per line.

use std::io::{BufRead, Read};

use serde_json::Value;

use crate::{
    errors::{BpeError, BpeResult},
    vocab::{merge_ranks::MergePair, token_vocab::TokenIdMap},
};

/// The token vocabulary resource name.
pub const ENCODER_JSON: &str = "encoder.json";

/// The merge list resource name.
pub const VOCAB_BPE: &str = "vocab.bpe";

fn malformed(
    resource: &'static str,
    line: usize,
    reason: String,
) -> BpeError {
    BpeError::MalformedResource {
        resource,
        line,
        reason,
    }
}

/// Parse an "encoder.json" token map.
///
/// ## Returns
/// [`BpeError::MalformedResource`] on bad JSON, a non-object document,
/// or a non-integer id.
pub fn read_encoder_json<R>(encoder_json_reader: R) -> BpeResult<TokenIdMap>
where
    R: Read,
{
    let encoder_json: Value = serde_json::from_reader(encoder_json_reader).map_err(|e| {
        if e.is_io() {
            BpeError::Io(e.into())
        } else {
            malformed(ENCODER_JSON, e.line(), e.to_string())
        }
    })?;

    let Value::Object(entries) = encoder_json else {
        return Err(malformed(
            ENCODER_JSON,
            0,
            "expected a JSON object of token ids".to_string(),
        ));
    };

    entries
        .into_iter()
        .map(|(token, value)| match value.as_u64() {
            Some(id) => Ok((token, id)),
            None => Err(malformed(
                ENCODER_JSON,
                0,
                format!("token {token:?} has a non-integer id: {value}"),
            )),
        })
        .collect()
}

/// Parse a "vocab.bpe" merge list.
///
/// The first line is a header, and is ignored.
/// Trailing blank lines, and a truncated final line with fewer than two
/// symbols, are ignored; any other line must hold exactly two
/// whitespace-separated symbols.
///
/// ## Returns
/// The merge pairs, in priority order.
pub fn read_vocab_bpe<R>(vocab_bpe_reader: R) -> BpeResult<Vec<MergePair>>
where
    R: BufRead,
{
    let mut lines = vocab_bpe_reader.lines();

    match lines.next() {
        Some(header) => {
            header?;
        }
        None => {
            return Err(malformed(VOCAB_BPE, 1, "missing header line".to_string()));
        }
    }

    let mut pairs: Vec<MergePair> = vec![];
    let mut blank_line: Option<usize> = None;
    // A short line is only an error if another rule follows it.
    let mut partial_line: Option<(usize, usize)> = None;

    for (idx, line) in lines.enumerate() {
        let line = line?;
        // 1-based; after the header.
        let line_no = idx + 2;

        if line.trim().is_empty() {
            blank_line.get_or_insert(line_no);
            continue;
        }
        if let Some((partial, found)) = partial_line {
            return Err(malformed(
                VOCAB_BPE,
                partial,
                format!("expected 2 fields, found {found}"),
            ));
        }
        if let Some(blank) = blank_line {
            return Err(malformed(
                VOCAB_BPE,
                blank,
                "blank line between merge rules".to_string(),
            ));
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [first, second] => pairs.push((first.to_string(), second.to_string())),
            [_] => partial_line = Some((line_no, 1)),
            _ => {
                return Err(malformed(
                    VOCAB_BPE,
                    line_no,
                    format!("expected 2 fields, found {}", fields.len()),
                ));
            }
        }
    }

    if let Some((partial, _)) = partial_line {
        log::debug!("{VOCAB_BPE}: ignoring partial final line {partial}");
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_encoder_json() {
        let token_map = read_encoder_json(r#"{"!": 0, "Ġthe": 1, "a": 2}"#.as_bytes()).unwrap();
        assert_eq!(token_map.len(), 3);
        assert_eq!(token_map["Ġthe"], 1);
        assert_eq!(token_map["a"], 2);
    }

    #[test]
    fn test_read_encoder_json_errors() {
        let err = read_encoder_json(r#"{"a": 0,"#.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            BpeError::MalformedResource {
                resource: ENCODER_JSON,
                ..
            }
        ));

        let err = read_encoder_json("[1, 2]".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"), "{err}");

        let err = read_encoder_json(r#"{"a": -1}"#.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("non-integer id"), "{err}");

        let err = read_encoder_json(r#"{"a": "0"}"#.as_bytes()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_read_vocab_bpe() {
        let pairs = read_vocab_bpe("#version: 0.2\nĠ t\nh e\n\n".as_bytes()).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("Ġ".to_string(), "t".to_string()),
                ("h".to_string(), "e".to_string()),
            ]
        );

        // No trailing newline; tabs and CRLF are whitespace.
        let pairs = read_vocab_bpe("#version: 0.2\r\nĠ\tt\r\nh e".as_bytes()).unwrap();
        assert_eq!(pairs.len(), 2);

        // Header only.
        assert!(read_vocab_bpe("#version: 0.2\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_read_vocab_bpe_partial_final_line() {
        let expected = vec![
            ("Ġ".to_string(), "t".to_string()),
            ("h".to_string(), "e".to_string()),
        ];

        let pairs = read_vocab_bpe("#version: 0.2\nĠ t\nh e\nx".as_bytes()).unwrap();
        assert_eq!(pairs, expected);

        let pairs = read_vocab_bpe("#version: 0.2\nĠ t\nh e\nhe\n\n".as_bytes()).unwrap();
        assert_eq!(pairs, expected);

        let pairs = read_vocab_bpe("#version: 0.2\nx\n".as_bytes()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_read_vocab_bpe_errors() {
        let err = read_vocab_bpe("".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed vocab.bpe (line 1): missing header line"
        );

        let err = read_vocab_bpe("#version: 0.2\nĠ t\nhe\nh e\n".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed vocab.bpe (line 3): expected 2 fields, found 1"
        );

        let err = read_vocab_bpe("#version: 0.2\nhe\n\nh e\n".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed vocab.bpe (line 2): expected 2 fields, found 1"
        );

        // A truncated final line is only forgiven when it is short.
        let err = read_vocab_bpe("#version: 0.2\nĠ t\na b c".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed vocab.bpe (line 3): expected 2 fields, found 3"
        );

        let err = read_vocab_bpe("#version: 0.2\na b c\n".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed vocab.bpe (line 2): expected 2 fields, found 3"
        );

        let err = read_vocab_bpe("#version: 0.2\na b\n\nc d\n".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed vocab.bpe (line 3): blank line between merge rules"
        );
    }
}
