//! Table-driven property provider for unit tests.
//!
//! Covers a handful of blocks with hand-picked values so tests can pin the
//! iterators' policy without depending on a particular Unicode release.

use smallvec::smallvec;

use crate::char_props::{CharacterProperties, PairedBracketType, Script, ScriptList};

/// Code point with no script data at all.
pub(crate) const NO_SCRIPT_DATA: char = '\u{E000}';
/// Stand-in for a Common character whose preferred script is Han.
pub(crate) const COMMON_PREFERRING_HAN: char = '\u{3001}';
/// Stand-in for an inherited mark restricted to Devanagari and Bengali.
pub(crate) const INHERITED_DEVANAGARI_BENGALI: char = '\u{0951}';
/// Stand-in for a character shared between Hiragana and Katakana.
pub(crate) const HIRAGANA_OR_KATAKANA: char = '\u{30FC}';

#[derive(Debug, Default)]
pub(crate) struct FakeProperties;

impl FakeProperties {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl CharacterProperties for FakeProperties {
    fn scripts(&self, ch: char) -> ScriptList {
        match ch {
            NO_SCRIPT_DATA => ScriptList::new(),
            COMMON_PREFERRING_HAN => smallvec![Script::Common, Script::Han],
            INHERITED_DEVANAGARI_BENGALI => {
                smallvec![Script::Inherited, Script::Devanagari, Script::Bengali]
            }
            HIRAGANA_OR_KATAKANA => smallvec![Script::Hiragana, Script::Katakana],
            'a'..='z' | 'A'..='Z' => smallvec![Script::Latin],
            '\u{0300}'..='\u{036F}' => smallvec![Script::Inherited],
            '\u{0370}'..='\u{03FF}' => smallvec![Script::Greek],
            '\u{0400}'..='\u{04FF}' => smallvec![Script::Cyrillic],
            '\u{0600}'..='\u{06FF}' => smallvec![Script::Arabic],
            '\u{0900}'..='\u{097F}' => smallvec![Script::Devanagari],
            '\u{0980}'..='\u{09FF}' => smallvec![Script::Bengali],
            '\u{3041}'..='\u{309F}' => smallvec![Script::Hiragana],
            '\u{30A0}'..='\u{30FF}' => smallvec![Script::Katakana],
            '\u{4E00}'..='\u{9FFF}' => smallvec![Script::Han],
            _ => smallvec![Script::Common],
        }
    }

    fn paired_bracket(&self, ch: char) -> Option<char> {
        Some(match ch {
            '(' => ')',
            ')' => '(',
            '[' => ']',
            ']' => '[',
            '{' => '}',
            '}' => '{',
            '\u{300C}' => '\u{300D}',
            '\u{300D}' => '\u{300C}',
            _ => return None,
        })
    }

    fn paired_bracket_type(&self, ch: char) -> PairedBracketType {
        match ch {
            '(' | '[' | '{' | '\u{300C}' => PairedBracketType::Open,
            ')' | ']' | '}' | '\u{300D}' => PairedBracketType::Close,
            _ => PairedBracketType::None,
        }
    }

    fn combining_class(&self, ch: char) -> u8 {
        match ch {
            '\u{0300}'..='\u{036F}' | INHERITED_DEVANAGARI_BENGALI => 230,
            _ => 0,
        }
    }

    fn is_upright_in_mixed_vertical(&self, ch: char) -> bool {
        matches!(
            ch,
            '\u{3000}'..='\u{30FF}' | '\u{4E00}'..='\u{9FFF}' | '\u{1F000}'..='\u{1FAFF}'
        )
    }

    fn is_emoji_presentation(&self, ch: char) -> bool {
        matches!(
            ch,
            '\u{231A}' | '\u{1F308}' | '\u{1F3FB}'..='\u{1F3FF}' | '\u{1F466}' | '\u{1F600}'..='\u{1F64F}'
        )
    }

    fn is_emoji_text_presentation(&self, ch: char) -> bool {
        matches!(
            ch,
            '\u{00A9}' | '\u{263A}' | '\u{2640}' | '\u{2642}' | '\u{2764}' | '\u{1F3F3}' | '\u{1F441}' | '\u{1F5E8}'
        )
    }

    fn is_emoji_modifier_base(&self, ch: char) -> bool {
        matches!(ch, '\u{1F44D}' | '\u{1F466}')
    }

    fn is_emoji_modifier(&self, ch: char) -> bool {
        matches!(ch, '\u{1F3FB}'..='\u{1F3FF}')
    }

    fn is_math_symbol(&self, ch: char) -> bool {
        matches!(ch, '+' | '<' | '=' | '>' | '\u{2211}' | '\u{221E}')
    }
}
