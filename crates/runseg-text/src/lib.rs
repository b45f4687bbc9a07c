#![forbid(unsafe_code)]

//! Run segmentation for text shaping.
//!
//! Splits a UTF-16 buffer into maximal ranges that share one writing script,
//! one vertical-text orientation, and one font-fallback priority, so that a
//! shaper can resolve a single font and issue a single shaping call per
//! range.
//!
//! # This crate provides
//! - [`ScriptRunIterator`] for script runs, with Common/Inherited absorption
//!   and paired-bracket resolution.
//! - [`OrientationIterator`] for upright versus sideways runs in
//!   vertical-mixed text.
//! - [`SymbolsIterator`] for text / emoji / math fallback runs, including
//!   variation selectors, keycaps, flags, and ZWJ sequences.
//! - [`RunSegmenter`], which combines the three into the finest common
//!   partition.
//! - [`CharacterProperties`], the Unicode lookups the iterators need, and
//!   [`IcuCharacterProperties`], its ICU4X-backed implementation.
//!
//! # How it fits together
//! Every iterator borrows the buffer and a property provider and is consumed
//! once. Offsets are UTF-16 code units throughout; [`utf16::encode`] converts
//! a `&str` for callers that start from Rust strings.
//!
//! ```
//! use runseg_text::{IcuCharacterProperties, SegmenterOptions, segment_str};
//!
//! let props = IcuCharacterProperties::new();
//! let ranges = segment_str("\u{65E5}\u{672C}abc", &props, SegmenterOptions::VERTICAL_MIXED);
//! assert_eq!(ranges.len(), 2);
//! assert_eq!(ranges[1].range(), 2..5);
//! ```

/// Unicode property capability and fixed code points.
pub mod char_props;
/// Segmentation options.
pub mod config;
/// ICU4X-backed property provider.
pub mod icu_props;
/// Vertical-mixed orientation runs.
pub mod orientation;
/// Combined segmentation.
pub mod run_segmenter;
/// Script runs.
pub mod script_run;
/// Font-fallback priority runs.
pub mod symbols;
/// UTF-16 cursor.
pub mod utf16;

#[cfg(test)]
mod test_props;

pub use char_props::{CharacterProperties, MAX_SCRIPT_COUNT, PairedBracketType, Script, ScriptList};
pub use config::SegmenterOptions;
pub use icu_props::IcuCharacterProperties;
pub use orientation::{
    OrientationIterator, OrientationRun, ParseOrientationError, RenderOrientation,
    TextOrientation,
};
pub use run_segmenter::{RunSegmenter, RunSegmenterRange, segment_str, segment_utf16};
pub use script_run::{MAX_BRACKETS, ScriptRun, ScriptRunIterator};
pub use symbols::{FontFallbackPriority, SymbolsIterator, SymbolsRun};
