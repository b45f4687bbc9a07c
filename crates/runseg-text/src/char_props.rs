#![forbid(unsafe_code)]

//! Character property capability consumed by the segmentation iterators.
//!
//! The iterators never look Unicode data up on their own. Every question they
//! ask about a code point goes through [`CharacterProperties`], which the
//! caller constructs once and lends to each iterator. The crate ships one
//! implementation backed by ICU4X compiled data
//! ([`IcuCharacterProperties`](crate::IcuCharacterProperties)); tests use a
//! small table-driven one so that policy can be pinned independently of the
//! Unicode version.
//!
//! # Script lists
//!
//! [`CharacterProperties::scripts`] returns the scripts a code point may be
//! written in, priority script first. Two shapes carry special meaning for
//! the script merge:
//!
//! - `[Common]` / `[Inherited]`: transparent, takes the surrounding script.
//! - `[Common, X]`: transparent, but `X` is the preferred script should the
//!   whole run turn out to be Common.
//!
//! An empty list means "no script data"; the script iterator stops fetching
//! when it sees one.

use smallvec::SmallVec;

pub use icu_properties::props::Script;

/// Upper bound on the number of scripts reported for one code point.
pub const MAX_SCRIPT_COUNT: usize = 20;

/// Ordered scripts for one code point, priority script first.
pub type ScriptList = SmallVec<[Script; 4]>;

// ---------------------------------------------------------------------------
// Fixed code points
// ---------------------------------------------------------------------------

/// U+200D ZERO WIDTH JOINER.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';
/// U+FE0E VARIATION SELECTOR-15 (text presentation).
pub const VARIATION_SELECTOR_15: char = '\u{FE0E}';
/// U+FE0F VARIATION SELECTOR-16 (emoji presentation).
pub const VARIATION_SELECTOR_16: char = '\u{FE0F}';
/// U+20E3 COMBINING ENCLOSING KEYCAP.
pub const COMBINING_ENCLOSING_KEYCAP: char = '\u{20E3}';
/// U+20E0 COMBINING ENCLOSING CIRCLE BACKSLASH.
pub const COMBINING_ENCLOSING_CIRCLE_BACKSLASH: char = '\u{20E0}';

/// U+1F441 EYE.
pub const EYE: char = '\u{1F441}';
/// U+1F3F3 WAVING WHITE FLAG.
pub const WAVING_WHITE_FLAG: char = '\u{1F3F3}';
/// U+1F5E8 LEFT SPEECH BUBBLE.
pub const LEFT_SPEECH_BUBBLE: char = '\u{1F5E8}';
/// U+1F308 RAINBOW.
pub const RAINBOW: char = '\u{1F308}';
/// U+2642 MALE SIGN.
pub const MALE_SIGN: char = '\u{2642}';
/// U+2640 FEMALE SIGN.
pub const FEMALE_SIGN: char = '\u{2640}';

/// Text-default emoji that open a ZWJ sequence and are promoted to emoji
/// presentation when a ZWJ follows.
pub const ZWJ_SEQUENCE_ANCHORS: [char; 2] = [EYE, WAVING_WHITE_FLAG];

/// Characters that close a ZWJ sequence and keep the emoji presentation of
/// the sequence they join.
pub const ZWJ_SEQUENCE_TAILS: [char; 4] = [LEFT_SPEECH_BUBBLE, RAINBOW, MALE_SIGN, FEMALE_SIGN];

/// Whether `script` is one of the transparent pseudo-scripts.
#[inline]
pub fn is_common_or_inherited(script: Script) -> bool {
    script == Script::Common || script == Script::Inherited
}

// ---------------------------------------------------------------------------
// PairedBracketType
// ---------------------------------------------------------------------------

/// Bidi_Paired_Bracket_Type of a code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PairedBracketType {
    /// Not a paired bracket.
    #[default]
    None,
    /// Opening bracket, e.g. `(`.
    Open,
    /// Closing bracket, e.g. `)`.
    Close,
}

// ---------------------------------------------------------------------------
// CharacterProperties
// ---------------------------------------------------------------------------

/// Read-only Unicode property lookups needed for run segmentation.
///
/// Implementations are pure lookup tables and are expected to be shareable
/// across threads; the iterators only ever take `&self`.
pub trait CharacterProperties {
    /// Scripts of `ch`, priority script first, at most [`MAX_SCRIPT_COUNT`].
    ///
    /// An empty list signals missing or failed lookup.
    fn scripts(&self, ch: char) -> ScriptList;

    /// The Bidi_Paired_Bracket of `ch`, if it has one.
    fn paired_bracket(&self, ch: char) -> Option<char>;

    /// The Bidi_Paired_Bracket_Type of `ch`.
    fn paired_bracket_type(&self, ch: char) -> PairedBracketType;

    /// Canonical_Combining_Class of `ch`.
    fn combining_class(&self, ch: char) -> u8;

    /// Whether `ch` extends the preceding grapheme.
    ///
    /// Defaults to "has a non-zero combining class".
    fn is_grapheme_extend(&self, ch: char) -> bool {
        self.combining_class(ch) != 0
    }

    /// Whether `ch` stays upright in vertical mixed-orientation text.
    fn is_upright_in_mixed_vertical(&self, ch: char) -> bool;

    /// Emoji_Presentation: rendered as emoji by default.
    fn is_emoji_presentation(&self, ch: char) -> bool;

    /// An emoji rendered as text by default.
    fn is_emoji_text_presentation(&self, ch: char) -> bool;

    /// Emoji_Modifier_Base.
    fn is_emoji_modifier_base(&self, ch: char) -> bool;

    /// Emoji_Modifier (skin tone modifiers).
    fn is_emoji_modifier(&self, ch: char) -> bool;

    /// Regional indicator symbols U+1F1E6..=U+1F1FF.
    fn is_regional_indicator(&self, ch: char) -> bool {
        ('\u{1F1E6}'..='\u{1F1FF}').contains(&ch)
    }

    /// Characters that form a keycap sequence with U+20E3.
    fn is_emoji_keycap_base(&self, ch: char) -> bool {
        ch.is_ascii_digit() || ch == '#' || ch == '*'
    }

    /// Unicode Math property; only consulted when math splitting is enabled.
    fn is_math_symbol(&self, _ch: char) -> bool {
        false
    }
}
