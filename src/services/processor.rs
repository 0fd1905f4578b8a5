//! Document post-processing.
//!
//! Scans a document for citations, resolves them all concurrently and splices
//! each text node once every citation in it has resolved.

use futures::future;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;

use crate::citation::Citation;
use crate::config::Config;
use crate::document::{Document, NodeId};
use crate::fragment::Fragment;
use crate::services::resolver::Resolver;
use crate::services::splice::{self, NodeScan};
use crate::storage::ChapterStore;

/// Outcome for one citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    /// Text node the citation was found in.
    pub node: NodeId,
    /// The citation.
    pub citation: Citation,
    /// What it resolved to.
    pub fragment: Fragment,
    /// Whether the block made it into the document.
    pub spliced: bool,
}

/// Expands citations in documents.
pub struct Processor<S> {
    resolver: Resolver<S>,
}

impl<S: ChapterStore> Processor<S> {
    /// Create a processor around a resolver.
    pub const fn new(resolver: Resolver<S>) -> Self {
        Self { resolver }
    }

    /// Create a processor for `store` using the layout from `config`.
    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(Resolver::from_config(store, config))
    }

    /// The resolver in use.
    pub const fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    /// Host activation hook.
    pub fn on_load(&self) {
        tracing::info!(
            "Bible inline processor loaded (root: {})",
            self.resolver.layout().root
        );
    }

    /// Host deactivation hook.
    pub fn on_unload(&self) {
        tracing::info!("Bible inline processor unloaded");
    }

    /// Replace every citation in `doc` with its quotation block.
    ///
    /// Never fails as a whole: unresolvable citations become error blocks and a
    /// node that cannot be spliced is left as it was.
    pub async fn process(&self, doc: &mut Document) -> Vec<Expansion> {
        let scans = splice::scan_document(doc);
        if scans.is_empty() {
            return Vec::new();
        }

        let total: usize = scans.iter().map(|s| s.citations.len()).sum();
        tracing::debug!("Found {total} citations in {} text nodes", scans.len());

        let resolver = &self.resolver;
        let mut pending: FuturesUnordered<_> = scans
            .into_iter()
            .map(move |scan| async move {
                let fragments =
                    future::join_all(scan.citations.iter().map(|c| resolver.resolve(c))).await;
                (scan, fragments)
            })
            .collect();

        let mut expansions = Vec::with_capacity(total);
        while let Some((scan, fragments)) = pending.next().await {
            let spliced = match splice::splice_node(doc, &scan, &fragments) {
                Ok(spliced) => spliced,
                Err(e) => {
                    tracing::warn!("Failed to splice citations into {:?}: {e}", scan.node);
                    false
                }
            };
            collect_expansions(&mut expansions, scan, fragments, spliced);
        }

        expansions.sort_by_key(|e| (e.node, e.citation.start));

        let errors = expansions.iter().filter(|e| e.fragment.is_error()).count();
        tracing::info!("Expanded {} citations ({errors} unresolved)", expansions.len());

        expansions
    }

    /// Expand citations in plain text and return the rendered HTML.
    pub async fn render_text(&self, text: &str) -> (String, Vec<Expansion>) {
        let mut doc = Document::from_text(text);
        let expansions = self.process(&mut doc).await;
        (doc.to_html(), expansions)
    }
}

fn collect_expansions(
    out: &mut Vec<Expansion>,
    scan: NodeScan,
    fragments: Vec<Fragment>,
    spliced: bool,
) {
    let node = scan.node;
    out.extend(
        scan.citations
            .into_iter()
            .zip(fragments)
            .map(|(citation, fragment)| Expansion {
                node,
                citation,
                fragment,
                spliced,
            }),
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::storage::MemoryStore;

    fn processor() -> Processor<MemoryStore> {
        let store = MemoryStore::new()
            .with_file("esvbible/John/John_03.md", "## 16\nFor God so loved...\n## 17\nFor God did not send")
            .with_file("esvbible/Romans/Romans_08.md", "## 28\nAll things work together");
        Processor::new(Resolver::new(store))
    }

    #[tokio::test]
    async fn test_document_without_citations_is_untouched() {
        let mut doc = Document::from_text("plain -- text: 3:16");
        let before = doc.to_html();
        assert!(processor().process(&mut doc).await.is_empty());
        assert_eq!(doc.to_html(), before);
    }

    #[tokio::test]
    async fn test_expansions_sorted_per_node() {
        let p = processor();
        let (html, expansions) = p
            .render_text("--Rom 8:28-- and --John 3:16-17--\n\n--John 9:1--")
            .await;
        assert_eq!(expansions.len(), 3);
        assert!(expansions.iter().all(|e| e.spliced));
        let labels: Vec<&str> = expansions.iter().map(|e| e.fragment.label()).collect();
        assert_eq!(labels, vec!["Romans 8:28", "John 3:16-17", "Error loading John 9:1"]);
        assert!(html.contains("<sup>17</sup><span>For God did not send</span>"));
        assert!(html.contains("Error loading John 9:1</blockquote>"));
    }

    #[tokio::test]
    async fn test_lifecycle_hooks_are_harmless() {
        let p = processor();
        p.on_load();
        p.on_unload();
        assert_eq!(p.resolver().layout().root, "esvbible");
    }
}
