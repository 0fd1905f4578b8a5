//! Verse-segmented chapter text parsing.
//!
//! Chapter files introduce each verse with a level-2 heading holding only the
//! verse number:
//!
//! ```text
//! # John 3
//!
//! ## 16
//! For God so loved the world...
//!
//! ## 17
//! For God did not send his Son...
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Regex matching a verse heading line like `## 16`.
#[allow(clippy::expect_used)]
static RE_VERSE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s*(\d+)$").expect("valid regex: RE_VERSE_HEADING")
});

/// Verse bodies of one chapter keyed by verse number.
///
/// Iteration follows the order verses first appear in the chapter text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerseMap {
    verses: Vec<(u32, String)>,
    #[serde(skip)]
    index: HashMap<u32, usize>,
}

impl VerseMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a verse body; a repeated number replaces the earlier body in place.
    pub fn insert(&mut self, number: u32, body: impl Into<String>) {
        let body = body.into();
        if let Some(&idx) = self.index.get(&number) {
            if let Some(slot) = self.verses.get_mut(idx) {
                slot.1 = body;
            }
            return;
        }
        self.index.insert(number, self.verses.len());
        self.verses.push((number, body));
    }

    /// Body text of a verse.
    pub fn get(&self, number: u32) -> Option<&str> {
        self.index
            .get(&number)
            .and_then(|&idx| self.verses.get(idx))
            .map(|(_, body)| body.as_str())
    }

    /// Whether the chapter contains a verse.
    pub fn contains(&self, number: u32) -> bool {
        self.index.contains_key(&number)
    }

    /// Number of verses.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Whether no verse headings were found.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Highest verse number present.
    pub fn max_verse(&self) -> Option<u32> {
        self.verses.iter().map(|(n, _)| *n).max()
    }

    /// Verses in chapter order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.verses.iter().map(|(n, body)| (*n, body.as_str()))
    }
}

/// Split chapter text into verses.
///
/// Text before the first heading is ignored, and a chapter without headings
/// yields an empty map.
pub fn parse_verses(content: &str) -> VerseMap {
    let mut verses = VerseMap::new();
    let mut current: Option<u32> = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in content.lines() {
        if let Some(number) = verse_heading(line) {
            if let Some(prev) = current {
                verses.insert(prev, lines.join("\n").trim());
            }
            current = Some(number);
            lines.clear();
        } else if current.is_some() {
            lines.push(line);
        }
    }

    if let Some(last) = current {
        verses.insert(last, lines.join("\n").trim());
    }

    verses
}

/// Verse number of a heading line, or `None` for body text.
fn verse_heading(line: &str) -> Option<u32> {
    RE_VERSE_HEADING
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_parse_three_verses() {
        let text = "## 1\nIn the beginning\n## 2\nThe earth was\nwithout form\n\n## 3\nLet there be light\n";
        let verses = parse_verses(text);
        assert_eq!(verses.len(), 3);
        assert_eq!(verses.get(1), Some("In the beginning"));
        assert_eq!(verses.get(2), Some("The earth was\nwithout form"));
        assert_eq!(verses.get(3), Some("Let there be light"));
    }

    #[test]
    fn test_no_headings_is_empty() {
        assert!(parse_verses("").is_empty());
        assert!(parse_verses("# John 3\nJust some prose\n### 4\n").is_empty());
    }

    #[test]
    fn test_preamble_discarded() {
        let verses = parse_verses("# John 3\n\nintro line\n##16\nFor God so loved the world");
        assert_eq!(verses.len(), 1);
        assert_eq!(verses.get(16), Some("For God so loved the world"));
        assert!(!verses.contains(1));
    }

    #[test]
    fn test_duplicate_heading_last_wins() {
        let verses = parse_verses("## 2\nfirst\n## 1\none\n## 2\nsecond\n");
        assert_eq!(verses.get(2), Some("second"));
        let order: Vec<u32> = verses.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(verses.max_verse(), Some(2));
    }

    #[test]
    fn test_crlf_and_empty_bodies() {
        let verses = parse_verses("## 1\r\nalpha\r\n## 2\r\n## 3\r\n  gamma  \r\n");
        assert_eq!(verses.get(1), Some("alpha"));
        assert_eq!(verses.get(2), Some(""));
        assert_eq!(verses.get(3), Some("gamma"));
    }

    #[test]
    fn test_heading_must_be_only_digits() {
        let verses = parse_verses("## 1\nbody\n## 2a\nstill body\n");
        assert_eq!(verses.len(), 1);
        assert_eq!(verses.get(1), Some("body\n## 2a\nstill body"));
    }
}
