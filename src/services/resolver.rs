//! Citation resolution.
//!
//! Turns a [`Citation`] into a [`Fragment`] by reading the cited chapter from a
//! [`ChapterStore`]. Resolution never fails: unreadable chapters become error
//! fragments and missing verses are left out, both reported through `tracing`.

use std::sync::Arc;

use crate::bible::{parse_verses, BookTable};
use crate::citation::Citation;
use crate::config::Config;
use crate::constants::storage::{CHAPTER_PAD_WIDTH, DEFAULT_BIBLE_ROOT, DEFAULT_EXTENSION};
use crate::fragment::{Fragment, VerseEntry};
use crate::storage::ChapterStore;

/// Where chapter files live inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Directory holding one folder per book.
    pub root: String,
    /// Chapter file extension, without the dot.
    pub extension: String,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self {
            root: DEFAULT_BIBLE_ROOT.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl From<&Config> for StorageLayout {
    fn from(config: &Config) -> Self {
        Self {
            root: config.bible_root.clone(),
            extension: config.extension.clone(),
        }
    }
}

impl StorageLayout {
    /// Path of a chapter file, e.g. `esvbible/John/John_03.md`.
    pub fn chapter_path(&self, book: &str, chapter: u32) -> String {
        format!(
            "{root}/{book}/{book}_{chapter:0width$}.{ext}",
            root = self.root,
            width = CHAPTER_PAD_WIDTH,
            ext = self.extension,
        )
    }
}

/// Resolves citations against a chapter store.
pub struct Resolver<S> {
    store: S,
    books: Arc<BookTable>,
    layout: StorageLayout,
}

impl<S: ChapterStore> Resolver<S> {
    /// Create a resolver with the built-in book table and default layout.
    pub fn new(store: S) -> Self {
        Self {
            store,
            books: BookTable::shared(),
            layout: StorageLayout::default(),
        }
    }

    /// Create a resolver using the layout from `config`.
    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store).with_layout(StorageLayout::from(config))
    }

    /// Replace the storage layout.
    #[must_use]
    pub fn with_layout(mut self, layout: StorageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the book table.
    #[must_use]
    pub fn with_books(mut self, books: Arc<BookTable>) -> Self {
        self.books = books;
        self
    }

    /// The storage layout in use.
    pub const fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Canonical book name for a citation.
    pub fn book_name(&self, citation: &Citation) -> String {
        self.books.normalize(&citation.book_token)
    }

    /// Store path the citation's chapter is read from.
    pub fn chapter_path(&self, citation: &Citation) -> String {
        self.layout.chapter_path(&self.book_name(citation), citation.chapter)
    }

    /// Resolve one citation into a quotation fragment.
    pub async fn resolve(&self, citation: &Citation) -> Fragment {
        let book = self.book_name(citation);
        let label = format!("{book} {}:{}", citation.chapter, citation.verse_label());
        let path = self.layout.chapter_path(&book, citation.chapter);

        let content = match self.store.read(&path).await {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                tracing::error!("Error loading {label}: no chapter file at {path}");
                return Fragment::error(&label);
            }
            Err(e) => {
                tracing::error!("Error loading {label} from {path}: {e}");
                return Fragment::error(&label);
            }
        };

        let verses = parse_verses(&content);
        if verses.is_empty() {
            tracing::error!("No verses found in {path}");
            return Fragment::error(&label);
        }

        let show_number = citation.is_range();
        let last = verses
            .max_verse()
            .map_or(citation.verse_end, |max| max.min(citation.verse_end));
        if last < citation.verse_end {
            tracing::warn!(
                "Verses {}-{} not found in {path}",
                last.max(citation.verse_start.saturating_sub(1)) + 1,
                citation.verse_end
            );
        }

        let entries = (citation.verse_start..=last)
            .filter_map(|number| {
                let Some(text) = verses.get(number) else {
                    tracing::warn!("Verse {number} not found in {path}");
                    return None;
                };
                Some(VerseEntry {
                    number,
                    text: text.to_string(),
                    show_number,
                })
            })
            .collect();

        Fragment::Passage {
            verses: entries,
            label,
        }
    }
}
