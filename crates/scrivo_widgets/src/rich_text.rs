//! Attributed text
//!
//! `RichText` is a string plus formatting runs. Run ranges are expressed in
//! characters, the same unit used for cursor offsets.

use std::ops::Range;

use scrivo_core::style::{Color, Font};
use smallvec::SmallVec;

use crate::paragraph::ParagraphStyle;

/// Formatting attached to a range of text
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAttributes {
    pub font: Option<Font>,
    pub color: Option<Color>,
    pub paragraph: Option<ParagraphStyle>,
}

impl TextAttributes {
    pub fn is_empty(&self) -> bool {
        self.font.is_none() && self.color.is_none() && self.paragraph.is_none()
    }
}

/// A formatted range of characters
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRun {
    pub range: Range<usize>,
    pub attributes: TextAttributes,
}

/// Text with per-range formatting
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichText {
    text: String,
    runs: SmallVec<[AttributeRun; 2]>,
}

impl RichText {
    /// Unformatted text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: SmallVec::new(),
        }
    }

    /// Text formatted uniformly with `attributes`
    pub fn styled(text: impl Into<String>, attributes: TextAttributes) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self::new(text).with_run(0..len, attributes)
    }

    /// Add a formatting run, clamped to the text length
    pub fn with_run(mut self, range: Range<usize>, attributes: TextAttributes) -> Self {
        let len = self.char_len();
        let range = range.start.min(len)..range.end.min(len);
        if !range.is_empty() && !attributes.is_empty() {
            self.runs.push(AttributeRun { range, attributes });
            self.runs.sort_by_key(|run| run.range.start);
        }
        self
    }

    /// The plain-string projection
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace a character range, formatting the inserted text with `typing`
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str, typing: &TextAttributes) {
        let len = self.char_len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);

        let start_byte = char_to_byte_pos(&self.text, start);
        let end_byte = char_to_byte_pos(&self.text, end);
        self.text.replace_range(start_byte..end_byte, replacement);

        let inserted = replacement.chars().count();
        let shift = |pos: usize| {
            if pos <= start {
                pos
            } else if pos >= end {
                pos - (end - start) + inserted
            } else {
                start
            }
        };

        for run in self.runs.iter_mut() {
            run.range = shift(run.range.start)..shift(run.range.end);
        }
        self.runs.retain(|run| !run.range.is_empty());

        if inserted > 0 && !typing.is_empty() {
            self.runs.push(AttributeRun {
                range: start..start + inserted,
                attributes: typing.clone(),
            });
            self.runs.sort_by_key(|run| run.range.start);
        }
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Convert a character index to a byte index
pub(crate) fn char_to_byte_pos(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
