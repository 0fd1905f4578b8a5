//! Bible book names and chapter text parsing.
//!
//! [`books`] turns the loose book tokens found in citations into the canonical
//! names used for chapter folders, and [`verses`] splits a chapter file into
//! its numbered verses.

pub mod books;
pub mod verses;

pub use books::{normalize_book_name, BookTable};
pub use verses::{parse_verses, VerseMap};
