//! Inline citation scanning.
//!
//! Citations are written between double dashes, e.g. `--John 3:16--` or
//! `--1 cor 13:4-7--`. The book token is kept as written; normalizing it is the
//! resolver's job.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

/// Regex matching `--<book> <chapter>:<verse>[-<verse>]--`.
///
/// Both cases are listed in the book class instead of using `(?i)`, and digits
/// are spelled `[0-9]`: `\d` and case folding are Unicode aware in `regex`, and
/// a non-ASCII run would swallow the delimiters of the next citation.
#[allow(clippy::expect_used)]
static RE_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--([0-9A-Za-z .]+?)\s*([0-9]+):([0-9]+)(?:-([0-9]+))?--")
        .expect("valid regex: RE_CITATION")
});

/// A citation found in a block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    /// Book token as written, trimmed (e.g. `"1cor"`).
    pub book_token: String,
    /// Chapter number.
    pub chapter: u32,
    /// First verse of the range.
    pub verse_start: u32,
    /// Last verse of the range (same as start for a single verse).
    pub verse_end: u32,
    /// Byte offset of the opening `--`.
    pub start: usize,
    /// Byte offset just past the closing `--`.
    pub end: usize,
}

impl Citation {
    /// Byte range of the citation in the scanned text.
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the citation covers more than one verse.
    pub const fn is_range(&self) -> bool {
        self.verse_start != self.verse_end
    }

    /// Verse part of the label (e.g. `"16"` or `"4-7"`).
    pub fn verse_label(&self) -> String {
        if self.is_range() {
            format!("{}-{}", self.verse_start, self.verse_end)
        } else {
            self.verse_start.to_string()
        }
    }
}

/// Find every citation in `text`, left to right, without overlaps.
pub fn scan(text: &str) -> Vec<Citation> {
    RE_CITATION
        .captures_iter(text)
        .filter_map(|caps| {
            let citation = from_captures(&caps);
            if citation.is_none() {
                tracing::debug!("Ignoring malformed citation {:?}", &caps[0]);
            }
            citation
        })
        .collect()
}

fn from_captures(caps: &Captures<'_>) -> Option<Citation> {
    let whole = caps.get(0)?;
    let book_token = caps.get(1)?.as_str().trim().to_string();
    let chapter: u32 = caps.get(2)?.as_str().parse().ok()?;
    let verse_start: u32 = caps.get(3)?.as_str().parse().ok()?;
    let verse_end: u32 = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => verse_start,
    };

    if verse_end < verse_start {
        return None;
    }

    Some(Citation {
        book_token,
        chapter,
        verse_start,
        verse_end,
        start: whole.start(),
        end: whole.end(),
    })
}
