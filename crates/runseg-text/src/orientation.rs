#![forbid(unsafe_code)]

//! Vertical-mixed orientation runs.
//!
//! In `vertical-mixed` text each grapheme is either kept upright or rotated
//! 90 degrees clockwise. [`OrientationIterator`] splits the buffer where that
//! choice flips. Characters that extend the preceding grapheme inherit its
//! orientation, so a combining mark never starts a run of its own unless it
//! opens the buffer.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::char_props::CharacterProperties;
use crate::utf16::Utf16Chars;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a run of glyphs is placed in vertical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderOrientation {
    /// Glyphs stay upright.
    #[default]
    Keep,
    /// Glyphs are rotated 90 degrees clockwise.
    RotateSideways,
}

impl RenderOrientation {
    /// Short lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::RotateSideways => "rotate-sideways",
        }
    }
}

impl fmt::Display for RenderOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writing-mode orientation of the whole text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextOrientation {
    /// Horizontal text; never split by orientation.
    #[default]
    Horizontal,
    /// Vertical text with every glyph upright.
    VerticalUpright,
    /// Vertical text where each grapheme picks its own orientation.
    VerticalMixed,
}

impl TextOrientation {
    /// Canonical name accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::VerticalUpright => "vertical-upright",
            Self::VerticalMixed => "vertical-mixed",
        }
    }

    /// Whether the text needs per-grapheme orientation segmentation.
    #[inline]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::VerticalMixed)
    }
}

impl fmt::Display for TextOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TextOrientation`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrientationError {
    input: String,
}

impl ParseOrientationError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseOrientationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown text orientation {:?} (expected horizontal, vertical-upright or vertical-mixed)",
            self.input
        )
    }
}

impl std::error::Error for ParseOrientationError {}

impl FromStr for TextOrientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical-upright" | "upright" => Ok(Self::VerticalUpright),
            "vertical-mixed" | "mixed" => Ok(Self::VerticalMixed),
            _ => Err(ParseOrientationError {
                input: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// OrientationIterator
// ---------------------------------------------------------------------------

/// A contiguous run sharing one render orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientationRun {
    /// Start offset in code units (inclusive).
    pub start: usize,
    /// End offset in code units (exclusive).
    pub end: usize,
    /// Orientation of the run.
    pub orientation: RenderOrientation,
}

/// Splits vertical-mixed text into upright and sideways runs.
#[derive(Debug, Clone)]
pub struct OrientationIterator<'a, P: CharacterProperties + ?Sized> {
    chars: Utf16Chars<'a>,
    len: usize,
    props: &'a P,
    previous: Option<RenderOrientation>,
    at_end: bool,
    last_limit: usize,
}

impl<'a, P: CharacterProperties + ?Sized> OrientationIterator<'a, P> {
    /// Create an iterator over `text`.
    pub fn new(text: &'a [u16], props: &'a P) -> Self {
        Self {
            chars: Utf16Chars::new(text),
            len: text.len(),
            props,
            previous: None,
            at_end: text.is_empty(),
            last_limit: 0,
        }
    }

    /// Advance to the end of the next run, returning its limit and
    /// orientation.
    pub fn consume(&mut self) -> Option<(usize, RenderOrientation)> {
        if self.at_end {
            return None;
        }

        while let Some(c) = self.chars.next() {
            let ch = c.char_or_replacement();
            if self.previous.is_some() && self.props.is_grapheme_extend(ch) {
                continue;
            }
            let orientation = if self.props.is_upright_in_mixed_vertical(ch) {
                RenderOrientation::Keep
            } else {
                RenderOrientation::RotateSideways
            };
            match self.previous.replace(orientation) {
                Some(prev) if prev != orientation => return Some((c.offset, prev)),
                _ => {}
            }
        }

        self.at_end = true;
        self.previous.map(|prev| (self.len, prev))
    }
}

impl<P: CharacterProperties + ?Sized> Iterator for OrientationIterator<'_, P> {
    type Item = OrientationRun;

    fn next(&mut self) -> Option<OrientationRun> {
        let (end, orientation) = self.consume()?;
        let start = std::mem::replace(&mut self.last_limit, end);
        Some(OrientationRun {
            start,
            end,
            orientation,
        })
    }
}

impl<P: CharacterProperties + ?Sized> FusedIterator for OrientationIterator<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_props::FakeProperties;
    use crate::utf16::encode;
    use RenderOrientation::{Keep, RotateSideways};

    fn runs(text: &str) -> Vec<(usize, usize, RenderOrientation)> {
        let props = FakeProperties::new();
        let buf = encode(text);
        OrientationIterator::new(&buf, &props)
            .map(|r| (r.start, r.end, r.orientation))
            .collect()
    }

    #[test]
    fn empty_buffer() {
        let props = FakeProperties::new();
        let mut iter = OrientationIterator::new(&[], &props);
        assert_eq!(iter.consume(), None);
        assert_eq!(iter.consume(), None);
    }

    #[test]
    fn all_upright() {
        assert_eq!(runs("\u{3042}\u{65E5}\u{672C}"), vec![(0, 3, Keep)]);
    }

    #[test]
    fn all_sideways() {
        assert_eq!(runs("abc"), vec![(0, 3, RotateSideways)]);
    }

    #[test]
    fn mixed_runs() {
        assert_eq!(
            runs("\u{3042}\u{3044}abc\u{3046}"),
            vec![(0, 2, Keep), (2, 5, RotateSideways), (5, 6, Keep)]
        );
    }

    #[test]
    fn combining_mark_follows_base() {
        assert_eq!(
            runs("\u{3042}a\u{0301}\u{3044}"),
            vec![(0, 1, Keep), (1, 3, RotateSideways), (3, 4, Keep)]
        );
        // An upright base keeps its mark upright.
        assert_eq!(runs("\u{3042}\u{0301}"), vec![(0, 2, Keep)]);
    }

    #[test]
    fn leading_combining_mark_is_classified() {
        assert_eq!(runs("\u{0300}"), vec![(0, 1, RotateSideways)]);
    }

    #[test]
    fn supplementary_offsets() {
        assert_eq!(
            runs("ab\u{1F600}c"),
            vec![(0, 2, RotateSideways), (2, 4, Keep), (4, 5, RotateSideways)]
        );
    }

    #[test]
    fn lone_surrogate_classified_as_replacement() {
        let props = FakeProperties::new();
        let buf = [0x3042, 0xD800, 0x3044];
        let got: Vec<_> = OrientationIterator::new(&buf, &props)
            .map(|r| (r.start, r.end, r.orientation))
            .collect();
        assert_eq!(got, vec![(0, 1, Keep), (1, 2, RotateSideways), (2, 3, Keep)]);
    }

    #[test]
    fn text_orientation_parse_and_display() {
        for o in [
            TextOrientation::Horizontal,
            TextOrientation::VerticalUpright,
            TextOrientation::VerticalMixed,
        ] {
            assert_eq!(o.to_string().parse::<TextOrientation>(), Ok(o));
        }
        assert_eq!("Mixed".parse(), Ok(TextOrientation::VerticalMixed));
        assert_eq!(" upright ".parse(), Ok(TextOrientation::VerticalUpright));
        let err = "diagonal".parse::<TextOrientation>().unwrap_err();
        assert_eq!(err.input(), "diagonal");
        assert!(err.to_string().contains("diagonal"));
    }

    #[test]
    fn render_orientation_names() {
        assert_eq!(Keep.to_string(), "keep");
        assert_eq!(RotateSideways.to_string(), "rotate-sideways");
        assert_eq!(RenderOrientation::default(), Keep);
        assert!(TextOrientation::VerticalMixed.is_mixed());
        assert!(!TextOrientation::VerticalUpright.is_mixed());
    }
}
