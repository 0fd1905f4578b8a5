//! `Inline Scripture` - expands `--Book chapter:verse--` citations in documents.
//!
//! Citations are found in a document's text, resolved against per-chapter
//! files in a [`storage::ChapterStore`], and replaced by quotation blocks.

pub mod bible;
pub mod citation;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod fragment;
pub mod services;
pub mod storage;

pub use services::processor::{Expansion, Processor};
pub use services::resolver::{Resolver, StorageLayout};
