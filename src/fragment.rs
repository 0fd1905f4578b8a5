//! Quotation blocks that replace citations.

use serde::Serialize;

use crate::constants::render::{ERROR_LABEL_PREFIX, VERSE_BLOCK_CLASS};
use crate::document::{Document, NodeId};
use crate::error::Result;

/// One quoted verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseEntry {
    /// Verse number.
    pub number: u32,
    /// Verse body.
    pub text: String,
    /// Whether the number is shown next to the body (multi-verse citations).
    pub show_number: bool,
}

/// Replacement for one citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// Verses found in the chapter, followed by the citation label.
    Passage {
        /// Found verses in ascending order; may be empty.
        verses: Vec<VerseEntry>,
        /// Citation label, e.g. `"John 3:16-18"`.
        label: String,
    },
    /// The chapter could not be loaded.
    Error {
        /// Error text, e.g. `"Error loading John 3:16"`.
        label: String,
    },
}

impl Fragment {
    /// Error fragment for a citation label.
    pub fn error(citation_label: &str) -> Self {
        Self::Error {
            label: format!("{ERROR_LABEL_PREFIX} {citation_label}"),
        }
    }

    /// Footer label of a passage, or the error text.
    pub fn label(&self) -> &str {
        match self {
            Self::Passage { label, .. } | Self::Error { label } => label,
        }
    }

    /// Quoted verses (empty for errors).
    pub fn verses(&self) -> &[VerseEntry] {
        match self {
            Self::Passage { verses, .. } => verses,
            Self::Error { .. } => &[],
        }
    }

    /// Whether this is an error block.
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Build the detached `<blockquote>` for this fragment.
    ///
    /// ```html
    /// <blockquote class="bible-verse-block">
    ///   <div><sup>2</sup><span>...</span></div>
    ///   <footer>John 3:2-3</footer>
    /// </blockquote>
    /// ```
    pub fn build(&self, doc: &mut Document) -> Result<NodeId> {
        let block = doc.create_element("blockquote", &[VERSE_BLOCK_CLASS]);

        match self {
            Self::Error { label } => {
                let text = doc.create_text(label.as_str());
                doc.append(block, text)?;
            }
            Self::Passage { verses, label } => {
                for verse in verses {
                    let div = doc.create_element("div", &[]);
                    if verse.show_number {
                        let sup = doc.create_element("sup", &[]);
                        let number = doc.create_text(verse.number.to_string());
                        doc.append(sup, number)?;
                        doc.append(div, sup)?;
                    }
                    let span = doc.create_element("span", &[]);
                    let body = doc.create_text(verse.text.as_str());
                    doc.append(span, body)?;
                    doc.append(div, span)?;
                    doc.append(block, div)?;
                }

                let footer = doc.create_element("footer", &[]);
                let text = doc.create_text(label.as_str());
                doc.append(footer, text)?;
                doc.append(block, footer)?;
            }
        }

        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn entry(number: u32, text: &str, show_number: bool) -> VerseEntry {
        VerseEntry {
            number,
            text: text.to_string(),
            show_number,
        }
    }

    #[test]
    fn test_single_verse_block() {
        let mut doc = Document::new();
        let fragment = Fragment::Passage {
            verses: vec![entry(16, "For God so loved...", false)],
            label: "John 3:16".to_string(),
        };
        let block = fragment.build(&mut doc).unwrap();
        assert_eq!(
            doc.node_html(block),
            "<blockquote class=\"bible-verse-block\"><div><span>For God so loved...</span></div><footer>John 3:16</footer></blockquote>"
        );
    }

    #[test]
    fn test_range_block_numbers_verses() {
        let mut doc = Document::new();
        let fragment = Fragment::Passage {
            verses: vec![entry(4, "Love is patient", true), entry(5, "it is not rude", true)],
            label: "1 Corinthians 13:4-5".to_string(),
        };
        let block = fragment.build(&mut doc).unwrap();
        let html = doc.node_html(block);
        assert!(html.contains("<div><sup>4</sup><span>Love is patient</span></div>"));
        assert!(html.contains("<div><sup>5</sup><span>it is not rude</span></div>"));
        assert!(html.ends_with("<footer>1 Corinthians 13:4-5</footer></blockquote>"));
    }

    #[test]
    fn test_error_block() {
        let mut doc = Document::new();
        let fragment = Fragment::error("Hezekiah 1:1-2");
        assert!(fragment.is_error());
        assert!(fragment.verses().is_empty());
        assert_eq!(fragment.label(), "Error loading Hezekiah 1:1-2");
        let block = fragment.build(&mut doc).unwrap();
        assert_eq!(
            doc.node_html(block),
            "<blockquote class=\"bible-verse-block\">Error loading Hezekiah 1:1-2</blockquote>"
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(Fragment::error("John 3:16")).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["label"], "Error loading John 3:16");
    }
}
