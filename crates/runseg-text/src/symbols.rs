#![forbid(unsafe_code)]

//! Font-fallback priority runs.
//!
//! [`SymbolsIterator`] decides, per grapheme-ish unit, whether font fallback
//! should look for a text font, a color emoji font, a monochrome emoji font,
//! or (optionally) a math font, and splits the buffer where that choice
//! changes.
//!
//! # Design
//!
//! Each code point gets a base priority from its emoji properties, then one
//! code point of lookahead can upgrade or downgrade it:
//!
//! | Current                    | Next       | Result        |
//! |----------------------------|------------|---------------|
//! | emoji presentation         | VS15       | `EmojiText`   |
//! | text presentation / keycap | VS16       | `EmojiEmoji`  |
//! | keycap base                | U+20E3     | `EmojiEmoji`  |
//! | regional indicator         | RI         | `EmojiEmoji`  |
//! | EYE / WAVING WHITE FLAG    | ZWJ        | `EmojiEmoji`  |
//! | text presentation          | U+20E0     | `EmojiEmoji`  |
//!
//! Once a run is open, joiners, variation selectors, and regional indicators
//! take the previous code point's priority as their base instead of being
//! classified; so do the known ZWJ sequence tails while the open run is
//! `EmojiEmoji`. The lookahead table still applies to that carried base, which
//! is what lets `a🇯🇵` split before the flag and keeps `👁️‍🗨️` in one run.

use std::fmt;
use std::iter::{FusedIterator, Peekable};

use crate::char_props::{
    COMBINING_ENCLOSING_CIRCLE_BACKSLASH, COMBINING_ENCLOSING_KEYCAP, CharacterProperties,
    VARIATION_SELECTOR_15, VARIATION_SELECTOR_16, ZERO_WIDTH_JOINER, ZWJ_SEQUENCE_ANCHORS,
    ZWJ_SEQUENCE_TAILS,
};
use crate::utf16::Utf16Chars;

/// Which kind of font fallback should serve a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFallbackPriority {
    /// Ordinary text fonts.
    #[default]
    Text,
    /// Math fonts. Only produced when math splitting is enabled.
    Math,
    /// Emoji rendered with text (monochrome) presentation.
    EmojiText,
    /// Emoji rendered with emoji (color) presentation.
    EmojiEmoji,
}

impl FontFallbackPriority {
    /// Whether this priority selects an emoji font.
    #[inline]
    pub const fn is_emoji(self) -> bool {
        matches!(self, Self::EmojiText | Self::EmojiEmoji)
    }

    /// Short lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Math => "math",
            Self::EmojiText => "emoji-text",
            Self::EmojiEmoji => "emoji-emoji",
        }
    }
}

impl fmt::Display for FontFallbackPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous run sharing one fallback priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolsRun {
    /// Start offset in code units (inclusive).
    pub start: usize,
    /// End offset in code units (exclusive).
    pub end: usize,
    /// Fallback priority of the run.
    pub priority: FontFallbackPriority,
}

/// Splits text into runs by [`FontFallbackPriority`].
#[derive(Debug, Clone)]
pub struct SymbolsIterator<'a, P: CharacterProperties + ?Sized> {
    chars: Peekable<Utf16Chars<'a>>,
    len: usize,
    props: &'a P,
    split_math: bool,
    current: Option<FontFallbackPriority>,
    at_end: bool,
    last_limit: usize,
}

impl<'a, P: CharacterProperties + ?Sized> SymbolsIterator<'a, P> {
    /// Create an iterator over `text`. Math symbols stay `Text`.
    pub fn new(text: &'a [u16], props: &'a P) -> Self {
        Self::with_math_split(text, props, false)
    }

    /// Create an iterator that reports math symbols as
    /// [`FontFallbackPriority::Math`] when `split_math` is set.
    pub fn with_math_split(text: &'a [u16], props: &'a P, split_math: bool) -> Self {
        Self {
            chars: Utf16Chars::new(text).peekable(),
            len: text.len(),
            props,
            split_math,
            current: None,
            at_end: text.is_empty(),
            last_limit: 0,
        }
    }

    /// Advance to the end of the next run, returning its limit and priority.
    pub fn consume(&mut self) -> Option<(usize, FontFallbackPriority)> {
        if self.at_end {
            return None;
        }

        while let Some(c) = self.chars.next() {
            let ch = c.char_or_replacement();
            let base = self
                .carried_priority(ch)
                .unwrap_or_else(|| self.base_priority(ch));
            let next = self.chars.peek().map(|n| n.char_or_replacement());
            let priority = self.priority_with_lookahead(ch, base, next);
            match self.current.replace(priority) {
                Some(prev) if prev != priority => return Some((c.offset, prev)),
                _ => {}
            }
        }

        self.at_end = true;
        self.current.map(|prev| (self.len, prev))
    }

    /// The previous code point's priority, when `ch` takes it over instead of
    /// being classified on its own. Lookahead still applies on top of it.
    fn carried_priority(&self, ch: char) -> Option<FontFallbackPriority> {
        let current = self.current?;
        let carries =
            matches!(ch, ZERO_WIDTH_JOINER | VARIATION_SELECTOR_15 | VARIATION_SELECTOR_16)
                || self.props.is_regional_indicator(ch)
                || (current == FontFallbackPriority::EmojiEmoji
                    && ZWJ_SEQUENCE_TAILS.contains(&ch));
        carries.then_some(current)
    }

    fn base_priority(&self, ch: char) -> FontFallbackPriority {
        let props = self.props;
        if props.is_emoji_keycap_base(ch) || props.is_regional_indicator(ch) {
            FontFallbackPriority::Text
        } else if ch == COMBINING_ENCLOSING_KEYCAP || ch == COMBINING_ENCLOSING_CIRCLE_BACKSLASH {
            FontFallbackPriority::EmojiEmoji
        } else if props.is_emoji_presentation(ch)
            || props.is_emoji_modifier_base(ch)
            || props.is_emoji_modifier(ch)
        {
            FontFallbackPriority::EmojiEmoji
        } else if props.is_emoji_text_presentation(ch) {
            FontFallbackPriority::EmojiText
        } else if self.split_math && props.is_math_symbol(ch) {
            FontFallbackPriority::Math
        } else {
            FontFallbackPriority::Text
        }
    }

    fn priority_with_lookahead(
        &self,
        ch: char,
        base: FontFallbackPriority,
        next: Option<char>,
    ) -> FontFallbackPriority {
        use FontFallbackPriority::{EmojiEmoji, EmojiText};

        let Some(next) = next else {
            return base;
        };
        let props = self.props;
        let keycap_base = props.is_emoji_keycap_base(ch);

        match next {
            VARIATION_SELECTOR_15 if base == EmojiEmoji => EmojiText,
            VARIATION_SELECTOR_16 if base == EmojiText || keycap_base => EmojiEmoji,
            COMBINING_ENCLOSING_KEYCAP if keycap_base => EmojiEmoji,
            ZERO_WIDTH_JOINER if ZWJ_SEQUENCE_ANCHORS.contains(&ch) => EmojiEmoji,
            COMBINING_ENCLOSING_CIRCLE_BACKSLASH if base == EmojiText => EmojiEmoji,
            _ if props.is_regional_indicator(ch) && props.is_regional_indicator(next) => {
                EmojiEmoji
            }
            _ => base,
        }
    }
}

impl<P: CharacterProperties + ?Sized> Iterator for SymbolsIterator<'_, P> {
    type Item = SymbolsRun;

    fn next(&mut self) -> Option<SymbolsRun> {
        let (end, priority) = self.consume()?;
        let start = std::mem::replace(&mut self.last_limit, end);
        Some(SymbolsRun {
            start,
            end,
            priority,
        })
    }
}

impl<P: CharacterProperties + ?Sized> FusedIterator for SymbolsIterator<'_, P> {}
