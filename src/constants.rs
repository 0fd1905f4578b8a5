//! Application constants.
//!
//! Centralizes storage layout and rendering values.

/// Chapter storage layout constants.
pub mod storage {
    /// Default vault-relative directory holding one folder per book.
    pub const DEFAULT_BIBLE_ROOT: &str = "esvbible";

    /// Default chapter file extension (without the dot).
    pub const DEFAULT_EXTENSION: &str = "md";

    /// Minimum width of the zero-padded chapter number in file names.
    pub const CHAPTER_PAD_WIDTH: usize = 2;
}

/// Quotation block rendering constants.
pub mod render {
    /// Class applied to every generated quotation block.
    pub const VERSE_BLOCK_CLASS: &str = "bible-verse-block";

    /// Prefix of the label shown when a citation cannot be resolved.
    pub const ERROR_LABEL_PREFIX: &str = "Error loading";
}

/// Logging constants.
pub mod logging {
    /// Filter used when `RUST_LOG` is not set.
    pub const DEFAULT_FILTER: &str = "inline_scripture=info";
}
