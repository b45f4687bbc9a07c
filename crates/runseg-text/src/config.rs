#![forbid(unsafe_code)]

//! Segmentation options.
//!
//! [`SegmenterOptions`] bundles the knobs a [`RunSegmenter`](crate::RunSegmenter)
//! reads at construction time. Presets cover the three writing modes; the
//! `with_*` builders adjust individual fields.

use std::fmt;

use crate::orientation::{RenderOrientation, TextOrientation};

// =========================================================================
// SegmenterOptions
// =========================================================================

/// Configuration for one segmentation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmenterOptions {
    /// Writing-mode orientation of the text.
    pub orientation: TextOrientation,

    /// Orientation reported for every range when `orientation` is not
    /// [`TextOrientation::VerticalMixed`].
    pub fixed_orientation: RenderOrientation,

    /// Report math symbols as their own fallback priority.
    pub split_math: bool,
}

impl SegmenterOptions {
    /// Horizontal text.
    pub const HORIZONTAL: Self = Self {
        orientation: TextOrientation::Horizontal,
        fixed_orientation: RenderOrientation::Keep,
        split_math: false,
    };

    /// Vertical text, every glyph upright.
    pub const VERTICAL_UPRIGHT: Self = Self {
        orientation: TextOrientation::VerticalUpright,
        fixed_orientation: RenderOrientation::Keep,
        split_math: false,
    };

    /// Vertical text with per-grapheme orientation.
    pub const VERTICAL_MIXED: Self = Self {
        orientation: TextOrientation::VerticalMixed,
        fixed_orientation: RenderOrientation::Keep,
        split_math: false,
    };

    /// The preset for `orientation`.
    #[must_use]
    pub const fn for_orientation(orientation: TextOrientation) -> Self {
        match orientation {
            TextOrientation::Horizontal => Self::HORIZONTAL,
            TextOrientation::VerticalUpright => Self::VERTICAL_UPRIGHT,
            TextOrientation::VerticalMixed => Self::VERTICAL_MIXED,
        }
    }

    /// Replace the text orientation.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: TextOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Replace the orientation used outside vertical-mixed text.
    #[must_use]
    pub const fn with_fixed_orientation(mut self, fixed: RenderOrientation) -> Self {
        self.fixed_orientation = fixed;
        self
    }

    /// Enable or disable math splitting.
    #[must_use]
    pub const fn with_split_math(mut self, split_math: bool) -> Self {
        self.split_math = split_math;
        self
    }
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self::HORIZONTAL
    }
}

impl fmt::Display for SegmenterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "orientation={} fixed={} split_math={}",
            self.orientation, self.fixed_orientation, self.split_math
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_horizontal() {
        assert_eq!(SegmenterOptions::default(), SegmenterOptions::HORIZONTAL);
        assert!(!SegmenterOptions::default().split_math);
    }

    #[test]
    fn presets_match_orientation() {
        for o in [
            TextOrientation::Horizontal,
            TextOrientation::VerticalUpright,
            TextOrientation::VerticalMixed,
        ] {
            assert_eq!(SegmenterOptions::for_orientation(o).orientation, o);
        }
    }

    #[test]
    fn builders() {
        let opts = SegmenterOptions::HORIZONTAL
            .with_orientation(TextOrientation::VerticalMixed)
            .with_fixed_orientation(RenderOrientation::RotateSideways)
            .with_split_math(true);
        assert_eq!(opts.orientation, TextOrientation::VerticalMixed);
        assert_eq!(opts.fixed_orientation, RenderOrientation::RotateSideways);
        assert!(opts.split_math);
    }

    #[test]
    fn display() {
        assert_eq!(
            SegmenterOptions::VERTICAL_MIXED.to_string(),
            "orientation=vertical-mixed fixed=keep split_math=false"
        );
    }
}
