#![forbid(unsafe_code)]

//! UTF-16 buffer cursor shared by the segmentation iterators.
//!
//! All run limits produced by this crate are offsets in UTF-16 code units,
//! so the iterators walk the buffer through [`Utf16Chars`], which decodes one
//! code point at a time and reports where it starts and ends. An unpaired
//! surrogate is reported with `ch: None` and a width of one code unit; each
//! iterator decides how to classify it.

use std::iter::FusedIterator;

/// One decoded code point and its position in the UTF-16 buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf16Char {
    /// Offset of the first code unit (inclusive).
    pub offset: usize,
    /// Offset just past the last code unit (exclusive).
    pub end: usize,
    /// The decoded character, or `None` for an unpaired surrogate.
    pub ch: Option<char>,
}

impl Utf16Char {
    /// The decoded character, substituting U+FFFD for an unpaired surrogate.
    #[inline]
    pub fn char_or_replacement(&self) -> char {
        self.ch.unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// Forward-only code point cursor over a borrowed UTF-16 buffer.
#[derive(Debug, Clone)]
pub struct Utf16Chars<'a> {
    text: &'a [u16],
    offset: usize,
}

impl<'a> Utf16Chars<'a> {
    /// Start decoding at the beginning of `text`.
    #[inline]
    pub const fn new(text: &'a [u16]) -> Self {
        Self { text, offset: 0 }
    }

    /// Code units consumed so far.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Whether every code unit has been consumed.
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.offset >= self.text.len()
    }
}

impl Iterator for Utf16Chars<'_> {
    type Item = Utf16Char;

    fn next(&mut self) -> Option<Utf16Char> {
        let rest = self.text.get(self.offset..)?;
        let decoded = char::decode_utf16(rest.iter().copied()).next()?;
        let offset = self.offset;
        let (ch, width) = match decoded {
            Ok(c) => (Some(c), c.len_utf16()),
            Err(_) => (None, 1),
        };
        self.offset += width;
        Some(Utf16Char {
            offset,
            end: self.offset,
            ch,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len().saturating_sub(self.offset);
        (remaining.div_ceil(2), Some(remaining))
    }
}

impl FusedIterator for Utf16Chars<'_> {}

/// Encode a string as UTF-16 code units.
#[inline]
pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmp_and_supplementary_offsets() {
        let buf = encode("a\u{1F600}b");
        let chars: Vec<_> = Utf16Chars::new(&buf).collect();
        assert_eq!(
            chars,
            vec![
                Utf16Char { offset: 0, end: 1, ch: Some('a') },
                Utf16Char { offset: 1, end: 3, ch: Some('\u{1F600}') },
                Utf16Char { offset: 3, end: 4, ch: Some('b') },
            ]
        );
    }

    #[test]
    fn lone_surrogates_are_single_units() {
        let buf = [0x0061, 0xD800, 0xDC00, 0xDC00, 0x0062];
        let chars: Vec<_> = Utf16Chars::new(&buf).collect();
        assert_eq!(chars.len(), 4);
        assert_eq!(chars[1].ch, Some('\u{10000}'));
        assert_eq!((chars[2].offset, chars[2].end, chars[2].ch), (3, 4, None));
        assert_eq!(chars[2].char_or_replacement(), '\u{FFFD}');
        assert_eq!(chars[3].ch, Some('b'));
    }

    #[test]
    fn trailing_high_surrogate() {
        let buf = [0x0061, 0xD83D];
        let mut it = Utf16Chars::new(&buf);
        assert_eq!(it.next().map(|c| c.ch), Some(Some('a')));
        let last = it.next().unwrap();
        assert_eq!((last.offset, last.end, last.ch), (1, 2, None));
        assert!(it.is_at_end());
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn empty_buffer() {
        let mut it = Utf16Chars::new(&[]);
        assert!(it.is_at_end());
        assert_eq!(it.next(), None);
    }
}
