//! # Byte/Unicode Mapping
//!
//! GPT-2 vocabularies are stored as text; every byte value is represented by
//! one printable character so that whitespace and control bytes survive the
//! regex and JSON layers intact.
//!
//! The "visible" ISO/IEC 8859-1 ranges map to themselves:
//! ``[0x21-0x7E]``, ``[0xA1-0xAC]``, ``[0xAE-0xFF]``.
//! The remaining 68 bytes map to ``U+0100``, ``U+0101``, ... in ascending byte order.

use core::fmt::Debug;

use crate::{
    errors::{BpeError, BpeResult},
    types::CommonHashMap,
};

/// The number of bytes outside the visible ranges.
pub const REMAPPED_BYTE_COUNT: usize = 68;

/// The first codepoint assigned to a remapped byte.
const REMAP_BASE: u32 = 256;

/// Is `b` in one of the identity-mapped visible ranges?
pub const fn is_visible_byte(b: u8) -> bool {
    matches!(b, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// ``0..=255`` Byte/Codepoint Bijection Table
#[derive(Clone, PartialEq)]
pub struct ByteUnicodeMapping {
    /// Table mapping from byte ordinal (position) to char.
    byte_chars: [char; 256],

    /// Hash map from char to byte ordinal value.
    char_bytes: CommonHashMap<char, u8>,
}

impl Debug for ByteUnicodeMapping {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteUnicodeMapping")
            .field("len", &self.char_bytes.len())
            .finish()
    }
}

impl Default for ByteUnicodeMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteUnicodeMapping {
    /// Build the GPT-2 byte/unicode table.
    pub fn new() -> Self {
        let mut byte_chars = ['\0'; 256];

        let mut n = 0u32;
        for b in 0..=255u8 {
            byte_chars[b as usize] = if is_visible_byte(b) {
                char::from(b)
            } else {
                let c = char::from_u32(REMAP_BASE + n)
                    .expect("remapped codepoints are below the surrogate range");
                n += 1;
                c
            };
        }
        debug_assert_eq!(n as usize, REMAPPED_BYTE_COUNT);

        let char_bytes: CommonHashMap<char, u8> = byte_chars
            .iter()
            .enumerate()
            .map(|(b, &c)| (c, b as u8))
            .collect();

        Self {
            byte_chars,
            char_bytes,
        }
    }

    /// Get the char representing a given byte.
    #[inline(always)]
    pub fn to_codepoint(
        &self,
        byte: u8,
    ) -> char {
        self.byte_chars[byte as usize]
    }

    /// Get the byte represented by a given char, if any.
    #[inline(always)]
    pub fn try_byte(
        &self,
        c: char,
    ) -> Option<u8> {
        self.char_bytes.get(&c).copied()
    }

    /// Get the byte represented by a given char.
    ///
    /// ## Returns
    /// [`BpeError::UnknownCodepoint`] if `c` is not in the table.
    pub fn to_byte(
        &self,
        c: char,
    ) -> BpeResult<u8> {
        self.try_byte(c).ok_or(BpeError::UnknownCodepoint {
            codepoint: c as u32,
        })
    }

    /// Append the mapped chars of `bytes` to a target symbol string.
    #[inline(always)]
    pub fn append_mapped(
        &self,
        bytes: &[u8],
        symbols: &mut String,
    ) {
        symbols.extend(bytes.iter().map(|&b| self.to_codepoint(b)));
    }

    /// Append the bytes represented by `symbols` to a target buffer.
    ///
    /// ## Returns
    /// [`BpeError::UnknownCodepoint`] on the first char not in the table;
    /// `buf` may have been partially extended.
    pub fn append_unmapped(
        &self,
        symbols: &str,
        buf: &mut Vec<u8>,
    ) -> BpeResult<()> {
        for c in symbols.chars() {
            buf.push(self.to_byte(c)?);
        }
        Ok(())
    }

    /// Iterate over the 256 base symbols in GPT-2 vocabulary order.
    ///
    /// The visible bytes come first, then the remapped bytes;
    /// each group in ascending byte order.
    pub fn base_symbols(&self) -> impl Iterator<Item = char> + '_ {
        let visible = (0..=255u8).filter(|&b| is_visible_byte(b));
        let remapped = (0..=255u8).filter(|&b| !is_visible_byte(b));
        visible.chain(remapped).map(|b| self.to_codepoint(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommonHashSet;

    #[test]
    fn test_bijection() {
        let mapping = ByteUnicodeMapping::default();

        let chars: CommonHashSet<char> = (0..=255u8).map(|b| mapping.to_codepoint(b)).collect();
        assert_eq!(chars.len(), 256);

        for b in 0..=255u8 {
            let c = mapping.to_codepoint(b);
            assert_eq!(mapping.to_byte(c).unwrap(), b);
            assert!(!c.is_whitespace() && !c.is_control(), "{b:#x} -> {c:?}");
        }
    }

    #[test]
    fn test_known_codepoints() {
        let mapping = ByteUnicodeMapping::default();

        assert_eq!(mapping.to_codepoint(b'!'), '!');
        assert_eq!(mapping.to_codepoint(b'a'), 'a');
        assert_eq!(mapping.to_codepoint(0xAE), '\u{AE}');

        // The remapped bytes, in order.
        assert_eq!(mapping.to_codepoint(0x00), '\u{100}');
        assert_eq!(mapping.to_codepoint(b'\n'), '\u{10A}');
        assert_eq!(mapping.to_codepoint(b' '), '\u{120}');
        assert_eq!(mapping.to_codepoint(0x7F), '\u{121}');
        assert_eq!(mapping.to_codepoint(0xAD), '\u{143}');

        let remapped = (0..=255u8).filter(|&b| !is_visible_byte(b)).count();
        assert_eq!(remapped, REMAPPED_BYTE_COUNT);
    }

    #[test]
    fn test_unknown_codepoint() {
        let mapping = ByteUnicodeMapping::default();

        assert_eq!(mapping.try_byte('\u{144}'), None);
        assert!(matches!(
            mapping.to_byte('中'),
            Err(BpeError::UnknownCodepoint { codepoint: 0x4E2D })
        ));

        let mut buf = vec![];
        assert!(mapping.append_unmapped("Ġok中", &mut buf).is_err());
    }

    #[test]
    fn test_append_round_trip() {
        let mapping = ByteUnicodeMapping::default();
        let text = " hello\tworld\n\u{00e9}\u{1f600}";

        let mut symbols = String::new();
        mapping.append_mapped(text.as_bytes(), &mut symbols);
        assert_eq!(symbols.chars().count(), text.len());
        assert!(symbols.starts_with("Ġhello"));

        let mut buf = vec![];
        mapping.append_unmapped(&symbols, &mut buf).unwrap();
        assert_eq!(buf, text.as_bytes());
    }

    #[test]
    fn test_base_symbols_order() {
        let mapping = ByteUnicodeMapping::default();
        let symbols: Vec<char> = mapping.base_symbols().collect();
        assert_eq!(symbols.len(), 256);
        assert_eq!(symbols[0], '!');
        assert_eq!(symbols[93], '~');
        assert_eq!(symbols[188], '\u{100}');
        assert_eq!(symbols[255], '\u{143}');
    }
}
