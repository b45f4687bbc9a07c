#![forbid(unsafe_code)]

//! Script run segmentation over UTF-16 text.
//!
//! [`ScriptRunIterator`] splits a buffer into maximal runs whose characters
//! can all be written in one script. It is the first of the three
//! sub-iterators combined by [`RunSegmenter`](crate::RunSegmenter).
//!
//! # Design
//!
//! The iterator keeps the set of scripts the run in progress is still
//! compatible with (`current_set`) and intersects it with the set of each new
//! code point (`next_set`). When the intersection is empty the run ends.
//!
//! - `Common` and `Inherited` code points are transparent: they never end a
//!   run, and a run that has only seen them adopts the first real script.
//! - A Common code point of the shape `[Common, X]` records `X` as the
//!   preferred script, used if the whole run stays Common.
//! - A closing bracket takes the script resolved for its opening bracket, so
//!   `「…」` or `(…)` does not split away from the text around the opener.
//!   Open brackets wait on a bounded stack ([`MAX_BRACKETS`]) until the run
//!   they were opened in is resolved.
//!
//! One code point of lookahead is kept so that an inherited mark restricted
//! to particular scripts can hand those scripts to a Common base before the
//! base is merged.
//!
//! # Example
//!
//! ```
//! use runseg_text::{IcuCharacterProperties, Script, ScriptRunIterator, utf16};
//!
//! let props = IcuCharacterProperties::new();
//! let text = utf16::encode("abc\u{3042}\u{3044}");
//! let runs: Vec<_> = ScriptRunIterator::new(&text, &props).collect();
//! assert_eq!(runs.len(), 2);
//! assert_eq!((runs[0].end, runs[0].script), (3, Script::Latin));
//! assert_eq!((runs[1].end, runs[1].script), (5, Script::Hiragana));
//! ```

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::char_props::{
    CharacterProperties, MAX_SCRIPT_COUNT, PairedBracketType, Script, ScriptList,
    is_common_or_inherited,
};
use crate::utf16::{Utf16Char, Utf16Chars};

/// Capacity of the open-bracket stack.
pub const MAX_BRACKETS: usize = 32;

// ---------------------------------------------------------------------------
// ScriptRun
// ---------------------------------------------------------------------------

/// A contiguous run of code units sharing one resolved script.
///
/// Offsets are UTF-16 code unit indices into the segmented buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptRun {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// Resolved script for this run.
    pub script: Script,
}

impl ScriptRun {
    /// Number of code units in the run.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the run is empty. Runs produced by the iterator never are.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ---------------------------------------------------------------------------
// BracketStack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BracketRec {
    ch: char,
    script: Script,
}

/// Bounded stack of open brackets awaiting their run's resolved script.
///
/// `fixup_depth` counts the topmost entries pushed since the last run was
/// resolved. Those are the entries [`BracketStack::fixup`] stamps.
#[derive(Debug, Clone, Default)]
struct BracketStack {
    entries: VecDeque<BracketRec>,
    fixup_depth: usize,
}

impl BracketStack {
    fn push(&mut self, ch: char) {
        if self.entries.len() == MAX_BRACKETS {
            self.entries.pop_front();
            if self.fixup_depth == MAX_BRACKETS {
                self.fixup_depth -= 1;
            }
        }
        self.entries.push_back(BracketRec {
            ch,
            script: Script::Common,
        });
        self.fixup_depth += 1;
    }

    /// Pop the most recent entry opened by `opener` and everything above it,
    /// returning the script recorded for it.
    fn close(&mut self, opener: char) -> Option<Script> {
        let index = self.entries.iter().rposition(|rec| rec.ch == opener)?;
        let script = self.entries[index].script;
        let popped = self.entries.len() - index;
        self.entries.truncate(index);
        self.fixup_depth = self.fixup_depth.saturating_sub(popped);
        Some(script)
    }

    fn fixup(&mut self, resolved: Script) {
        if self.fixup_depth == 0 {
            return;
        }
        if self.fixup_depth > self.entries.len() {
            tracing::warn!(
                fixup_depth = self.fixup_depth,
                stack_len = self.entries.len(),
                "bracket fixup depth exceeds stack size"
            );
            self.fixup_depth = self.entries.len();
        }
        for rec in self.entries.iter_mut().rev().take(self.fixup_depth) {
            rec.script = resolved;
        }
        self.fixup_depth = 0;
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// ScriptRunIterator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Lookahead {
    offset: usize,
    ch: char,
    scripts: ScriptList,
}

/// Splits UTF-16 text into runs of a single resolved script.
///
/// Call [`consume`](Self::consume) (or iterate) until it returns `None`.
/// The iterator is single-pass; segment again with a fresh instance.
#[derive(Debug, Clone)]
pub struct ScriptRunIterator<'a, P: CharacterProperties + ?Sized> {
    chars: Utf16Chars<'a>,
    len: usize,
    props: &'a P,
    brackets: BracketStack,
    current_set: ScriptList,
    next_set: ScriptList,
    ahead: Option<Lookahead>,
    common_preferred: Script,
    last_limit: usize,
}

impl<'a, P: CharacterProperties + ?Sized> ScriptRunIterator<'a, P> {
    /// Create an iterator over `text` using `props` for script data.
    pub fn new(text: &'a [u16], props: &'a P) -> Self {
        let mut iter = Self {
            chars: Utf16Chars::new(text),
            len: text.len(),
            props,
            brackets: BracketStack::default(),
            current_set: ScriptList::new(),
            next_set: ScriptList::new(),
            ahead: None,
            common_preferred: Script::Common,
            last_limit: 0,
        };
        if let Some(first) = iter.chars.next() {
            // Seeding with Common lets the first code point's scripts win the
            // first merge.
            iter.current_set.push(Script::Common);
            let scripts = iter.scripts_for(first);
            if scripts.is_empty() {
                iter.log_missing(first.offset);
            } else if let Some(ch) = first.ch {
                iter.ahead = Some(Lookahead {
                    offset: first.offset,
                    ch,
                    scripts,
                });
            }
        }
        iter
    }

    /// Advance to the end of the next run.
    ///
    /// Returns the run's limit (exclusive, in code units) and its resolved
    /// script, or `None` once the buffer is exhausted.
    pub fn consume(&mut self) -> Option<(usize, Script)> {
        if self.current_set.is_empty() {
            return None;
        }

        while let Some((pos, ch)) = self.fetch() {
            match self.props.paired_bracket_type(ch) {
                PairedBracketType::Open => self.brackets.push(ch),
                PairedBracketType::Close => self.close_bracket(ch),
                PairedBracketType::None => {}
            }
            if !self.merge_sets() {
                let script = self.resolve_current_script();
                self.brackets.fixup(script);
                self.current_set = std::mem::take(&mut self.next_set);
                return Some((pos, script));
            }
        }

        let script = self.resolve_current_script();
        self.current_set.clear();
        Some((self.len, script))
    }

    fn scripts_for(&self, c: Utf16Char) -> ScriptList {
        let Some(ch) = c.ch else {
            return ScriptList::new();
        };
        let mut scripts = self.props.scripts(ch);
        scripts.truncate(MAX_SCRIPT_COUNT);
        scripts
    }

    fn log_missing(&self, offset: usize) {
        tracing::debug!(offset, "no script data, ending script segmentation");
    }

    /// Move the lookahead into `next_set` and load the code point after it.
    fn fetch(&mut self) -> Option<(usize, char)> {
        let ahead = self.ahead.take()?;
        self.next_set = ahead.scripts;

        if let Some(following) = self.chars.next() {
            let mut scripts = self.scripts_for(following);
            let Some(ch) = following.ch.filter(|_| !scripts.is_empty()) else {
                self.log_missing(following.offset);
                return None;
            };
            if scripts.len() > 1 && scripts[0] == Script::Inherited {
                // An inherited mark restricted to some scripts hands them to
                // a Common base; the mark itself then simply inherits.
                if self.next_set.first() == Some(&Script::Common) {
                    self.next_set = ScriptList::from_slice(&scripts[1..]);
                }
                scripts.truncate(1);
            }
            self.ahead = Some(Lookahead {
                offset: following.offset,
                ch,
                scripts,
            });
        }

        Some((ahead.offset, ahead.ch))
    }

    fn close_bracket(&mut self, ch: char) {
        let Some(opener) = self.props.paired_bracket(ch) else {
            return;
        };
        if let Some(script) = self.brackets.close(opener) {
            self.next_set.clear();
            self.next_set.push(script);
        }
    }

    /// Intersect `current_set` with `next_set`.
    ///
    /// Returns `false`, leaving `current_set` untouched, when the sets are
    /// disjoint. The current priority script stays first if it survives,
    /// otherwise the next set's priority script does. The rest is the
    /// intersection of both sets past their priority scripts.
    fn merge_sets(&mut self) -> bool {
        let (Some(&priority), Some(&next_priority)) =
            (self.current_set.first(), self.next_set.first())
        else {
            return false;
        };

        if is_common_or_inherited(next_priority) {
            if self.next_set.len() == 2
                && is_common_or_inherited(priority)
                && self.common_preferred == Script::Common
            {
                self.common_preferred = self.next_set[1];
            }
            return true;
        }

        if is_common_or_inherited(priority) {
            self.current_set.clone_from(&self.next_set);
            return true;
        }

        if self.current_set.len() == 1 {
            return self.next_set.contains(&priority);
        }

        let current_rest = &self.current_set[1..];
        let next_rest = &self.next_set[1..];
        let (kept, have_priority) = if self.next_set.contains(&priority) {
            (priority, true)
        } else {
            (next_priority, current_rest.contains(&next_priority))
        };

        let mut merged = ScriptList::new();
        if have_priority {
            merged.push(kept);
        }
        if !next_rest.is_empty() {
            merged.extend(
                current_rest
                    .iter()
                    .copied()
                    .filter(|script| next_rest.contains(script)),
            );
        }

        if merged.is_empty() {
            return false;
        }
        self.current_set = merged;
        true
    }

    fn resolve_current_script(&self) -> Script {
        match self.current_set.first() {
            Some(&Script::Common) | None => self.common_preferred,
            Some(&script) => script,
        }
    }
}

impl<P: CharacterProperties + ?Sized> Iterator for ScriptRunIterator<'_, P> {
    type Item = ScriptRun;

    fn next(&mut self) -> Option<ScriptRun> {
        let (end, script) = self.consume()?;
        let start = std::mem::replace(&mut self.last_limit, end);
        Some(ScriptRun { start, end, script })
    }
}

impl<P: CharacterProperties + ?Sized> FusedIterator for ScriptRunIterator<'_, P> {}
