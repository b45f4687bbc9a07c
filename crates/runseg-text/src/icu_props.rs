#![forbid(unsafe_code)]

//! [`CharacterProperties`] backed by ICU4X compiled Unicode data.
//!
//! All lookups go through the `'static` borrowed views that
//! `icu_properties` bakes into the binary, so constructing an
//! [`IcuCharacterProperties`] costs a handful of pointer copies and no
//! allocation.
//!
//! # Script prioritisation
//!
//! ICU reports a code point's Script and Script_Extensions separately. The
//! merge in [`ScriptRunIterator`](crate::ScriptRunIterator) wants a single
//! ordered list with the most useful script first:
//!
//! | Script    | Extensions  | Result                                  |
//! |-----------|-------------|-----------------------------------------|
//! | X         | `[X, ..]`   | unchanged                               |
//! | X (real)  | `[.., ..]`  | X swapped to the front                  |
//! | Common    | `[Y]`       | `[Common, Y]` (Y is the preferred)      |
//! | Common    | `[Y, Z, ..]`| Common dropped, preferred first         |
//! | Inherited | `[Y, Z, ..]`| `[Inherited, preferred, ..]`            |
//!
//! "Preferred" is the lowest script code, except that Latin always yields.
//!
//! # Vertical orientation
//!
//! ICU4X does not ship the Vertical_Orientation property, so uprightness is
//! answered from [`UPRIGHT_RANGES`], the UTR #50 ranges whose value is not
//! `R` (upright, or transformed with an upright fallback).

use icu_properties::props::{
    BidiMirroringGlyph, BidiPairedBracketType, CanonicalCombiningClass, Emoji,
    EmojiModifier, EmojiModifierBase, EmojiPresentation, GraphemeExtend, Math,
};
use icu_properties::script::{ScriptWithExtensions, ScriptWithExtensionsBorrowed};
use icu_properties::{
    CodePointMapData, CodePointMapDataBorrowed, CodePointSetData, CodePointSetDataBorrowed,
};

use crate::char_props::{
    CharacterProperties, MAX_SCRIPT_COUNT, PairedBracketType, Script, ScriptList,
};

/// Code point ranges (inclusive) that stay upright in mixed vertical text.
///
/// Sorted and non-overlapping; searched with a binary search.
pub const UPRIGHT_RANGES: &[(u32, u32)] = &[
    (0x00A7, 0x00A7),
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x00B1, 0x00B1),
    (0x00BC, 0x00BE),
    (0x00D7, 0x00D7),
    (0x00F7, 0x00F7),
    (0x02EA, 0x02EB),
    (0x1100, 0x11FF),
    (0x1401, 0x167F),
    (0x18B0, 0x18FF),
    (0x2016, 0x2016),
    (0x2020, 0x2021),
    (0x2030, 0x2031),
    (0x203B, 0x203C),
    (0x2042, 0x2042),
    (0x2047, 0x2049),
    (0x2051, 0x2051),
    (0x2065, 0x2065),
    (0x20DD, 0x20E0),
    (0x20E2, 0x20E4),
    (0x2100, 0x2101),
    (0x2103, 0x2109),
    (0x210F, 0x210F),
    (0x2113, 0x2114),
    (0x2116, 0x2117),
    (0x211E, 0x2123),
    (0x2125, 0x2125),
    (0x2127, 0x2127),
    (0x2129, 0x2129),
    (0x212E, 0x212E),
    (0x2135, 0x213F),
    (0x2145, 0x214A),
    (0x214C, 0x214D),
    (0x214F, 0x2189),
    (0x218C, 0x218F),
    (0x221E, 0x221E),
    (0x2234, 0x2235),
    (0x2300, 0x2307),
    (0x230C, 0x231F),
    (0x2324, 0x2328),
    (0x232B, 0x232B),
    (0x237D, 0x239A),
    (0x23BE, 0x23CD),
    (0x23CF, 0x23CF),
    (0x23D1, 0x23DB),
    (0x23E2, 0x2422),
    (0x2424, 0x24FF),
    (0x25A0, 0x2619),
    (0x2620, 0x2767),
    (0x2776, 0x2793),
    (0x2B12, 0x2B2F),
    (0x2B50, 0x2B59),
    (0x2BB8, 0x2BD1),
    (0x2BD3, 0x2BEB),
    (0x2BF0, 0x2BFF),
    (0x2E50, 0x2E51),
    (0x2E80, 0xA4CF),
    (0xA960, 0xA97F),
    (0xAC00, 0xD7FF),
    (0xE000, 0xFAFF),
    (0xFE10, 0xFE1F),
    (0xFE30, 0xFE48),
    (0xFE50, 0xFE57),
    (0xFE5F, 0xFE62),
    (0xFE67, 0xFE6F),
    (0xFF01, 0xFF0C),
    (0xFF0E, 0xFF1B),
    (0xFF1F, 0xFF60),
    (0xFFE0, 0xFFE7),
    (0xFFF0, 0xFFF8),
    (0xFFFC, 0xFFFD),
    (0x10980, 0x1099F),
    (0x11580, 0x115FF),
    (0x11A00, 0x11AAF),
    (0x13000, 0x1345F),
    (0x14400, 0x1467F),
    (0x16FE0, 0x18AFF),
    (0x1B000, 0x1B2FF),
    (0x1D000, 0x1D1FF),
    (0x1D2E0, 0x1D37F),
    (0x1D800, 0x1DAAF),
    (0x1F000, 0x1F7FF),
    (0x1F900, 0x1FAFF),
    (0x20000, 0x2FFFD),
    (0x30000, 0x3FFFD),
    (0xF0000, 0xFFFFD),
    (0x100000, 0x10FFFD),
];

fn in_ranges(ranges: &[(u32, u32)], ch: char) -> bool {
    let cp = ch as u32;
    ranges
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Whether `candidate` should displace `head` as the preferred script.
#[inline]
fn prefer_over(candidate: Script, head: Script) -> bool {
    head == Script::Latin || candidate.to_icu4c_value() < head.to_icu4c_value()
}

/// Order `extensions` for a code point whose Script value is `primary`.
fn prioritize(primary: Script, mut list: ScriptList) -> ScriptList {
    if list.is_empty() || list[0] == primary {
        return list;
    }

    match primary {
        Script::Common if list.len() == 1 => {
            list.insert(0, Script::Common);
        }
        Script::Common => {
            for i in 1..list.len() {
                if prefer_over(list[i], list[0]) {
                    list.swap(0, i);
                }
            }
        }
        Script::Inherited => {
            list.insert(0, Script::Inherited);
            for i in 2..list.len() {
                if prefer_over(list[i], list[1]) {
                    list.swap(1, i);
                }
            }
        }
        _ => {
            let index = match list.iter().skip(1).position(|&s| s == primary) {
                Some(i) => i + 1,
                None => {
                    list.push(primary);
                    list.len() - 1
                }
            };
            list.swap(0, index);
        }
    }
    list
}

// ---------------------------------------------------------------------------
// IcuCharacterProperties
// ---------------------------------------------------------------------------

/// Character properties from ICU4X compiled data.
#[derive(Debug, Clone)]
pub struct IcuCharacterProperties {
    scripts: ScriptWithExtensionsBorrowed<'static>,
    mirroring: CodePointMapDataBorrowed<'static, BidiMirroringGlyph>,
    combining_class: CodePointMapDataBorrowed<'static, CanonicalCombiningClass>,
    grapheme_extend: CodePointSetDataBorrowed<'static>,
    emoji: CodePointSetDataBorrowed<'static>,
    emoji_presentation: CodePointSetDataBorrowed<'static>,
    emoji_modifier_base: CodePointSetDataBorrowed<'static>,
    emoji_modifier: CodePointSetDataBorrowed<'static>,
    math: CodePointSetDataBorrowed<'static>,
}

impl IcuCharacterProperties {
    /// Load the compiled property tables.
    pub fn new() -> Self {
        Self {
            scripts: ScriptWithExtensions::new(),
            mirroring: CodePointMapData::<BidiMirroringGlyph>::new(),
            combining_class: CodePointMapData::<CanonicalCombiningClass>::new(),
            grapheme_extend: CodePointSetData::new::<GraphemeExtend>(),
            emoji: CodePointSetData::new::<Emoji>(),
            emoji_presentation: CodePointSetData::new::<EmojiPresentation>(),
            emoji_modifier_base: CodePointSetData::new::<EmojiModifierBase>(),
            emoji_modifier: CodePointSetData::new::<EmojiModifier>(),
            math: CodePointSetData::new::<Math>(),
        }
    }
}

impl Default for IcuCharacterProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterProperties for IcuCharacterProperties {
    fn scripts(&self, ch: char) -> ScriptList {
        let primary = self.scripts.get_script_val(ch);
        let mut extensions: ScriptList = self
            .scripts
            .get_script_extensions_val(ch)
            .iter()
            .collect();
        // Leaves room for the primary script, which may be appended.
        if extensions.len() > MAX_SCRIPT_COUNT - 1 {
            tracing::debug!(
                code_point = ch as u32,
                count = extensions.len(),
                "too many script extensions, truncating"
            );
            extensions.truncate(MAX_SCRIPT_COUNT - 1);
        }
        prioritize(primary, extensions)
    }

    fn paired_bracket(&self, ch: char) -> Option<char> {
        let glyph = self.mirroring.get(ch);
        match glyph.paired_bracket_type {
            BidiPairedBracketType::None => None,
            _ => glyph.mirroring_glyph,
        }
    }

    fn paired_bracket_type(&self, ch: char) -> PairedBracketType {
        match self.mirroring.get(ch).paired_bracket_type {
            BidiPairedBracketType::Open => PairedBracketType::Open,
            BidiPairedBracketType::Close => PairedBracketType::Close,
            _ => PairedBracketType::None,
        }
    }

    fn combining_class(&self, ch: char) -> u8 {
        self.combining_class.get(ch).to_icu4c_value()
    }

    fn is_grapheme_extend(&self, ch: char) -> bool {
        self.grapheme_extend.contains(ch)
    }

    fn is_upright_in_mixed_vertical(&self, ch: char) -> bool {
        in_ranges(UPRIGHT_RANGES, ch)
    }

    fn is_emoji_presentation(&self, ch: char) -> bool {
        self.emoji_presentation.contains(ch)
    }

    fn is_emoji_text_presentation(&self, ch: char) -> bool {
        self.emoji.contains(ch) && !self.emoji_presentation.contains(ch)
    }

    fn is_emoji_modifier_base(&self, ch: char) -> bool {
        self.emoji_modifier_base.contains(ch)
    }

    fn is_emoji_modifier(&self, ch: char) -> bool {
        self.emoji_modifier.contains(ch)
    }

    fn is_math_symbol(&self, ch: char) -> bool {
        self.math.contains(ch)
    }
}
