//! Splicing quotation blocks into text nodes.
//!
//! Each text node is replaced exactly once, by the interleaved sequence of its
//! literal text and the blocks built for its citations. Offsets always refer to
//! the node's text as it was when scanned.

use crate::citation::{self, Citation};
use crate::document::{Document, NodeId};
use crate::error::{Error, Result};
use crate::fragment::Fragment;

/// Citations found in one text node, with a snapshot of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeScan {
    /// The text node.
    pub node: NodeId,
    /// Text of the node when it was scanned.
    pub text: String,
    /// Citations in ascending offset order.
    pub citations: Vec<Citation>,
}

/// One piece of a node's replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text kept from the original node.
    Text(&'a str),
    /// Quotation block for the citation at this index.
    Block(usize),
}

/// Scan every text node of a document for citations.
///
/// Nodes without citations are left out.
pub fn scan_document(doc: &Document) -> Vec<NodeScan> {
    doc.text_nodes()
        .into_iter()
        .filter_map(|node| {
            let text = doc.text(node)?;
            let citations = citation::scan(text);
            (!citations.is_empty()).then(|| NodeScan {
                node,
                text: text.to_string(),
                citations,
            })
        })
        .collect()
}

/// Interleave literal text and citation blocks for one node.
///
/// Empty literal pieces are dropped. Citations must be ascending and
/// non-overlapping, as produced by [`citation::scan`].
pub fn plan_segments<'a>(text: &'a str, citations: &[Citation]) -> Result<Vec<Segment<'a>>> {
    let mut segments = Vec::with_capacity(citations.len() * 2 + 1);
    let mut cursor = 0;

    for (idx, citation) in citations.iter().enumerate() {
        if citation.start < cursor {
            return Err(Error::Document(format!(
                "citation at {} overlaps the previous one ending at {cursor}",
                citation.start
            )));
        }
        let before = text
            .get(cursor..citation.start)
            .ok_or_else(|| Error::Document(format!("citation offset {} out of range", citation.start)))?;
        if !before.is_empty() {
            segments.push(Segment::Text(before));
        }
        segments.push(Segment::Block(idx));
        cursor = citation.end;
    }

    let after = text
        .get(cursor..)
        .ok_or_else(|| Error::Document(format!("citation offset {cursor} out of range")))?;
    if !after.is_empty() {
        segments.push(Segment::Text(after));
    }

    Ok(segments)
}

/// Replace a scanned node by its text and quotation blocks.
///
/// `fragments[i]` belongs to `scan.citations[i]`. Returns `Ok(false)` without
/// touching the tree when the node was detached or its text changed since the
/// scan.
pub fn splice_node(doc: &mut Document, scan: &NodeScan, fragments: &[Fragment]) -> Result<bool> {
    if fragments.len() != scan.citations.len() {
        return Err(Error::Document(format!(
            "{} fragments for {} citations in {:?}",
            fragments.len(),
            scan.citations.len(),
            scan.node
        )));
    }

    if !doc.is_attached(scan.node) || doc.text(scan.node) != Some(scan.text.as_str()) {
        tracing::warn!("Skipping {:?}: node changed since it was scanned", scan.node);
        return Ok(false);
    }

    let segments = plan_segments(&scan.text, &scan.citations)?;
    let mut replacements = Vec::with_capacity(segments.len());
    for segment in segments {
        let node = match segment {
            Segment::Text(text) => doc.create_text(text),
            Segment::Block(idx) => {
                let fragment = fragments
                    .get(idx)
                    .ok_or_else(|| Error::Document(format!("no fragment for citation {idx}")))?;
                fragment.build(doc)?
            }
        };
        replacements.push(node);
    }

    doc.replace_with(scan.node, &replacements)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::fragment::VerseEntry;

    fn passage(label: &str, body: &str) -> Fragment {
        Fragment::Passage {
            verses: vec![VerseEntry {
                number: 1,
                text: body.to_string(),
                show_number: false,
            }],
            label: label.to_string(),
        }
    }

    #[test]
    fn test_plan_interleaves_text_and_blocks() {
        let text = "a --Gen 1:1-- b --Gen 1:2--";
        let citations = citation::scan(text);
        let segments = plan_segments(text, &citations).unwrap();
        assert_eq!(
            segments,
            vec![Segment::Text("a "), Segment::Block(0), Segment::Text(" b "), Segment::Block(1)]
        );
    }

    #[test]
    fn test_plan_whole_text_citation() {
        let text = "--Gen 1:1--";
        let segments = plan_segments(text, &citation::scan(text)).unwrap();
        assert_eq!(segments, vec![Segment::Block(0)]);
    }

    #[test]
    fn test_plan_rejects_overlap() {
        let text = "--Gen 1:1-- --Gen 1:2--";
        let mut citations = citation::scan(text);
        citations.swap(0, 1);
        assert!(plan_segments(text, &citations).is_err());
    }

    #[test]
    fn test_scan_document_skips_plain_nodes() {
        let doc = Document::from_text("nothing here\n\nsee --Rom 8:28--");
        let scans = scan_document(&doc);
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].text, "see --Rom 8:28--");
        assert_eq!(scans[0].citations.len(), 1);
    }

    #[test]
    fn test_splice_two_citations_in_one_node() {
        let mut doc = Document::from_text("x --Gen 1:1-- y --Gen 1:2-- z");
        let scan = scan_document(&doc).remove(0);
        let fragments = vec![passage("Genesis 1:1", "first"), passage("Genesis 1:2", "second")];
        assert!(splice_node(&mut doc, &scan, &fragments).unwrap());
        assert_eq!(
            doc.to_html(),
            "<p>x <blockquote class=\"bible-verse-block\"><div><span>first</span></div><footer>Genesis 1:1</footer></blockquote> y <blockquote class=\"bible-verse-block\"><div><span>second</span></div><footer>Genesis 1:2</footer></blockquote> z</p>"
        );
    }

    #[test]
    fn test_splice_skips_stale_node() {
        let mut doc = Document::from_text("see --Rom 8:28--");
        let scan = scan_document(&doc).remove(0);
        let fragments = vec![passage("Romans 8:28", "all things")];
        assert!(splice_node(&mut doc, &scan, &fragments).unwrap());
        // Already replaced: a second splice must not touch the tree.
        let html = doc.to_html();
        assert!(!splice_node(&mut doc, &scan, &fragments).unwrap());
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_splice_fragment_count_mismatch() {
        let mut doc = Document::from_text("see --Rom 8:28--");
        let scan = scan_document(&doc).remove(0);
        assert!(splice_node(&mut doc, &scan, &[]).is_err());
    }
}
