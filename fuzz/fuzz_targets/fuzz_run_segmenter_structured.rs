#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use runseg_text::{
    IcuCharacterProperties, RenderOrientation, RunSegmenter, SegmenterOptions, TextOrientation,
};

/// Code points drawn from the classes the iterators treat specially.
#[derive(Debug, Arbitrary)]
enum Piece {
    Ascii(u8),
    Kana(u8),
    Han(u8),
    Mark(u8),
    Bracket(bool),
    Emoji(u8),
    Joiner,
    Selector(bool),
    Keycap,
    Regional(u8),
    Surrogate(u16),
    Raw(u16),
}

impl Piece {
    fn push(&self, out: &mut Vec<u16>) {
        let unit = match *self {
            Self::Ascii(b) => u16::from(b % 0x5F) + 0x20,
            Self::Kana(b) => 0x3041 + u16::from(b % 0xBE),
            Self::Han(b) => 0x4E00 + u16::from(b),
            Self::Mark(b) => 0x0300 + u16::from(b % 0x70),
            Self::Bracket(open) => {
                if open {
                    0x0028
                } else {
                    0x0029
                }
            }
            Self::Emoji(b) => {
                let ch = char::from_u32(0x1F600 + u32::from(b % 0x50)).unwrap_or('\u{1F600}');
                let mut buf = [0u16; 2];
                out.extend_from_slice(ch.encode_utf16(&mut buf));
                return;
            }
            Self::Joiner => 0x200D,
            Self::Selector(emoji) => {
                if emoji {
                    0xFE0F
                } else {
                    0xFE0E
                }
            }
            Self::Keycap => 0x20E3,
            Self::Regional(b) => {
                let ch = char::from_u32(0x1F1E6 + u32::from(b % 26)).unwrap_or('\u{1F1E6}');
                let mut buf = [0u16; 2];
                out.extend_from_slice(ch.encode_utf16(&mut buf));
                return;
            }
            Self::Surrogate(u) => 0xD800 | (u & 0x07FF),
            Self::Raw(u) => u,
        };
        out.push(unit);
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    pieces: Vec<Piece>,
    mixed: bool,
    rotate: bool,
    split_math: bool,
}

fuzz_target!(|input: Input| {
    if input.pieces.len() > 2048 {
        return;
    }
    let mut units = Vec::new();
    for piece in &input.pieces {
        piece.push(&mut units);
    }

    let orientation = if input.mixed {
        TextOrientation::VerticalMixed
    } else {
        TextOrientation::VerticalUpright
    };
    let fixed = if input.rotate {
        RenderOrientation::RotateSideways
    } else {
        RenderOrientation::Keep
    };
    let options = SegmenterOptions::for_orientation(orientation)
        .with_fixed_orientation(fixed)
        .with_split_math(input.split_math);

    let props = IcuCharacterProperties::new();
    let mut segmenter = RunSegmenter::with_options(&units, &props, options);
    let mut expected_start = 0;
    while let Some(range) = segmenter.consume() {
        assert_eq!(range.start, expected_start);
        assert!(range.end > range.start);
        if !input.mixed {
            assert_eq!(range.render_orientation, fixed);
        }
        expected_start = range.end;
    }
    assert_eq!(expected_start, units.len());
    assert!(segmenter.consume().is_none(), "exhaustion must be sticky");
});
