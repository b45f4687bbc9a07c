//! Rendering segmentation results as a table or JSON.

use std::io::Write;

use icu_properties::PropertyNamesLong;
use runseg_text::{CharacterProperties, RunSegmenterRange, Script, SegmenterOptions, segment_utf16, utf16};
use serde::Serialize;

use crate::error::Result;

/// One emitted range, with names resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeRow {
    pub start: usize,
    pub end: usize,
    pub script: String,
    pub orientation: String,
    pub priority: String,
    pub text: String,
}

/// Everything printed for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Input length in UTF-16 code units.
    pub length: usize,
    pub ranges: Vec<RangeRow>,
}

pub fn script_name(script: Script) -> String {
    PropertyNamesLong::<Script>::new()
        .get(script)
        .map_or_else(|| format!("{script:?}"), str::to_string)
}

impl Report {
    pub fn build<P: CharacterProperties + ?Sized>(
        text: &str,
        props: &P,
        options: SegmenterOptions,
    ) -> Self {
        let buf = utf16::encode(text);
        let ranges = segment_utf16(&buf, props, options)
            .iter()
            .map(|range| row(&buf, range))
            .collect();
        Self {
            length: buf.len(),
            ranges,
        }
    }

    pub fn write_table(&self, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "{:>11}  {:<14} {:<16} {:<12} TEXT",
            "RANGE", "SCRIPT", "ORIENTATION", "PRIORITY"
        )?;
        for row in &self.ranges {
            let span = format!("{}..{}", row.start, row.end);
            writeln!(
                out,
                "{span:>11}  {:<14} {:<16} {:<12} {:?}",
                row.script, row.orientation, row.priority, row.text
            )?;
        }
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn row(buf: &[u16], range: &RunSegmenterRange) -> RangeRow {
    RangeRow {
        start: range.start,
        end: range.end,
        script: script_name(range.script),
        orientation: range.render_orientation.to_string(),
        priority: range.font_fallback_priority.to_string(),
        text: String::from_utf16_lossy(buf.get(range.range()).unwrap_or_default()),
    }
}
