#![forbid(unsafe_code)]

//! Combined script / orientation / fallback-priority segmentation.
//!
//! [`RunSegmenter`] drives a [`ScriptRunIterator`], an optional
//! [`OrientationIterator`] and a [`SymbolsIterator`] over the same buffer and
//! reports the finest partition consistent with all three. Every emitted
//! [`RunSegmenterRange`] is homogeneous in script, render orientation, and
//! font-fallback priority, which is what a shaper needs to pick one font and
//! one shaping call per range.
//!
//! # Design
//!
//! Each sub-iterator is kept at least one boundary ahead of the last split.
//! The next split is the smallest of the three look-ahead boundaries, and
//! the range ending there takes each sub-iterator's current value. Outside
//! vertical-mixed text no orientation iterator exists: its position is pinned
//! to the buffer length and the orientation is the configured constant.
//!
//! # Example
//!
//! ```
//! use runseg_text::{
//!     FontFallbackPriority, IcuCharacterProperties, RenderOrientation, RunSegmenter, Script,
//!     TextOrientation, utf16,
//! };
//!
//! let props = IcuCharacterProperties::new();
//! let text = utf16::encode("abc\u{1F600}");
//! let ranges: Vec<_> = RunSegmenter::new(&text, &props, TextOrientation::Horizontal).collect();
//!
//! assert_eq!(ranges.len(), 2);
//! assert_eq!((ranges[0].start, ranges[0].end), (0, 3));
//! assert_eq!(ranges[1].font_fallback_priority, FontFallbackPriority::EmojiEmoji);
//! assert!(ranges.iter().all(|r| r.script == Script::Latin));
//! assert!(ranges.iter().all(|r| r.render_orientation == RenderOrientation::Keep));
//! ```

use std::iter::FusedIterator;
use std::ops::Range;

use crate::char_props::{CharacterProperties, Script};
use crate::config::SegmenterOptions;
use crate::orientation::{OrientationIterator, RenderOrientation, TextOrientation};
use crate::script_run::ScriptRunIterator;
use crate::symbols::{FontFallbackPriority, SymbolsIterator};

// ---------------------------------------------------------------------------
// RunSegmenterRange
// ---------------------------------------------------------------------------

/// One range that is uniform in script, orientation, and fallback priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunSegmenterRange {
    /// Start offset in UTF-16 code units (inclusive).
    pub start: usize,
    /// End offset in UTF-16 code units (exclusive).
    pub end: usize,
    /// Resolved script.
    pub script: Script,
    /// Glyph orientation.
    pub render_orientation: RenderOrientation,
    /// Font fallback priority.
    pub font_fallback_priority: FontFallbackPriority,
}

impl RunSegmenterRange {
    /// Number of code units covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The range as `start..end`.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

// ---------------------------------------------------------------------------
// RunSegmenter
// ---------------------------------------------------------------------------

/// Merges the three sub-iterators into one stream of ranges.
#[derive(Debug, Clone)]
pub struct RunSegmenter<'a, P: CharacterProperties + ?Sized> {
    len: usize,
    scripts: ScriptRunIterator<'a, P>,
    orientations: Option<OrientationIterator<'a, P>>,
    symbols: SymbolsIterator<'a, P>,

    script_pos: usize,
    script: Script,
    orientation_pos: usize,
    orientation: RenderOrientation,
    symbols_pos: usize,
    priority: FontFallbackPriority,

    last_split: usize,
    at_end: bool,
}

/// Pull from `consume` until the position passes `limit` or the source dries
/// up.
fn advance_past<T>(
    limit: usize,
    pos: &mut usize,
    value: &mut T,
    mut consume: impl FnMut() -> Option<(usize, T)>,
) {
    while *pos <= limit {
        let Some((next_pos, next_value)) = consume() else {
            break;
        };
        *pos = next_pos;
        *value = next_value;
    }
}

impl<'a, P: CharacterProperties + ?Sized> RunSegmenter<'a, P> {
    /// Segment `text` in the given writing mode with default options.
    pub fn new(text: &'a [u16], props: &'a P, orientation: TextOrientation) -> Self {
        Self::with_options(text, props, SegmenterOptions::for_orientation(orientation))
    }

    /// Segment `text` with explicit options.
    pub fn with_options(text: &'a [u16], props: &'a P, options: SegmenterOptions) -> Self {
        let len = text.len();
        let orientations = options
            .orientation
            .is_mixed()
            .then(|| OrientationIterator::new(text, props));
        Self {
            len,
            scripts: ScriptRunIterator::new(text, props),
            orientation_pos: if orientations.is_some() { 0 } else { len },
            orientations,
            symbols: SymbolsIterator::with_math_split(text, props, options.split_math),
            script_pos: 0,
            script: Script::Common,
            orientation: options.fixed_orientation,
            symbols_pos: 0,
            priority: FontFallbackPriority::Text,
            last_split: 0,
            at_end: len == 0,
        }
    }

    /// Length of the segmented buffer in code units.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the segmented buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Produce the next range, or `None` once the buffer is covered.
    pub fn consume(&mut self) -> Option<RunSegmenterRange> {
        if self.at_end {
            return None;
        }

        let limit = self.last_split;
        advance_past(limit, &mut self.script_pos, &mut self.script, || {
            self.scripts.consume()
        });
        if let Some(orientations) = self.orientations.as_mut() {
            advance_past(limit, &mut self.orientation_pos, &mut self.orientation, || {
                orientations.consume()
            });
        }
        advance_past(limit, &mut self.symbols_pos, &mut self.priority, || {
            self.symbols.consume()
        });

        let split = self
            .script_pos
            .min(self.orientation_pos)
            .min(self.symbols_pos);
        if split <= limit {
            // A sub-iterator ran dry short of the buffer end.
            tracing::warn!(
                split,
                len = self.len,
                "segmentation stalled before end of buffer"
            );
            self.at_end = true;
            return None;
        }

        self.last_split = split;
        self.at_end = split >= self.len;
        let range = RunSegmenterRange {
            start: limit,
            end: split,
            script: self.script,
            render_orientation: self.orientation,
            font_fallback_priority: self.priority,
        };
        tracing::trace!(
            start = range.start,
            end = range.end,
            script = ?range.script,
            orientation = %range.render_orientation,
            priority = %range.font_fallback_priority,
            "segment range"
        );
        Some(range)
    }
}

impl<P: CharacterProperties + ?Sized> Iterator for RunSegmenter<'_, P> {
    type Item = RunSegmenterRange;

    #[inline]
    fn next(&mut self) -> Option<RunSegmenterRange> {
        self.consume()
    }
}

impl<P: CharacterProperties + ?Sized> FusedIterator for RunSegmenter<'_, P> {}

// ---------------------------------------------------------------------------
// Collectors
// ---------------------------------------------------------------------------

/// Segment a UTF-16 buffer in one call.
pub fn segment_utf16<P: CharacterProperties + ?Sized>(
    text: &[u16],
    props: &P,
    options: SegmenterOptions,
) -> Vec<RunSegmenterRange> {
    let span = tracing::debug_span!("segment_utf16", len = text.len(), %options);
    let _guard = span.enter();
    let ranges: Vec<_> = RunSegmenter::with_options(text, props, options).collect();
    tracing::debug!(ranges = ranges.len(), "segmentation complete");
    ranges
}

/// Segment a string in one call.
///
/// Offsets in the returned ranges index the string's UTF-16 encoding, not its
/// UTF-8 bytes.
pub fn segment_str<P: CharacterProperties + ?Sized>(
    text: &str,
    props: &P,
    options: SegmenterOptions,
) -> Vec<RunSegmenterRange> {
    let span = tracing::debug_span!("segment_str", bytes = text.len());
    let _guard = span.enter();
    let buf = crate::utf16::encode(text);
    segment_utf16(&buf, props, options)
}
