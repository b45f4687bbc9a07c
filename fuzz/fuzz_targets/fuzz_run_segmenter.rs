#![no_main]

use libfuzzer_sys::fuzz_target;
use runseg_text::{
    IcuCharacterProperties, OrientationIterator, RunSegmenter, ScriptRunIterator,
    SymbolsIterator, TextOrientation,
};

fuzz_target!(|data: &[u8]| {
    // Pairs of bytes become code units, so lone surrogates show up freely.
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    // Cap length to keep fuzzing fast.
    if units.len() > 4096 {
        return;
    }
    let props = IcuCharacterProperties::new();

    for orientation in [
        TextOrientation::Horizontal,
        TextOrientation::VerticalUpright,
        TextOrientation::VerticalMixed,
    ] {
        let mut expected_start = 0;
        for range in RunSegmenter::new(&units, &props, orientation) {
            assert_eq!(range.start, expected_start, "gap or overlap");
            assert!(range.end > range.start, "empty range at {}", range.start);
            expected_start = range.end;
        }
        assert_eq!(expected_start, units.len(), "ranges must cover the buffer");
    }

    // Sub-iterators end exactly at the buffer length.
    let end = ScriptRunIterator::new(&units, &props).last().map_or(0, |r| r.end);
    assert_eq!(end, units.len());
    let end = OrientationIterator::new(&units, &props).last().map_or(0, |r| r.end);
    assert_eq!(end, units.len());
    let end = SymbolsIterator::new(&units, &props).last().map_or(0, |r| r.end);
    assert_eq!(end, units.len());
});
