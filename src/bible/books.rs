//! Book name normalization.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;

/// Abbreviations recognized out of the box, keyed by lookup key.
const STANDARD_ABBREVIATIONS: &[(&str, &str)] = &[
    // Old Testament
    ("gen", "Genesis"),
    ("ex", "Exodus"),
    ("exod", "Exodus"),
    ("lev", "Leviticus"),
    ("num", "Numbers"),
    ("deut", "Deuteronomy"),
    ("josh", "Joshua"),
    ("judg", "Judges"),
    ("ruth", "Ruth"),
    ("1sam", "1 Samuel"),
    ("1samuel", "1 Samuel"),
    ("2sam", "2 Samuel"),
    ("2samuel", "2 Samuel"),
    ("1kings", "1 Kings"),
    ("1kgs", "1 Kings"),
    ("2kings", "2 Kings"),
    ("2kgs", "2 Kings"),
    ("1chron", "1 Chronicles"),
    ("1chr", "1 Chronicles"),
    ("1chronicles", "1 Chronicles"),
    ("2chron", "2 Chronicles"),
    ("2chr", "2 Chronicles"),
    ("2chronicles", "2 Chronicles"),
    ("ezra", "Ezra"),
    ("neh", "Nehemiah"),
    ("est", "Esther"),
    ("esth", "Esther"),
    ("job", "Job"),
    ("ps", "Psalms"),
    ("psalm", "Psalms"),
    ("prov", "Proverbs"),
    ("eccles", "Ecclesiastes"),
    ("eccl", "Ecclesiastes"),
    ("song", "Song of Solomon"),
    ("songofsolomon", "Song of Solomon"),
    ("songofsongs", "Song of Solomon"),
    ("isa", "Isaiah"),
    ("jer", "Jeremiah"),
    ("lam", "Lamentations"),
    ("ezek", "Ezekiel"),
    ("dan", "Daniel"),
    ("hos", "Hosea"),
    ("joel", "Joel"),
    ("amos", "Amos"),
    ("obad", "Obadiah"),
    ("jonah", "Jonah"),
    ("mic", "Micah"),
    ("nah", "Nahum"),
    ("hab", "Habakkuk"),
    ("zeph", "Zephaniah"),
    ("hag", "Haggai"),
    ("zech", "Zechariah"),
    ("mal", "Malachi"),
    // New Testament
    ("matt", "Matthew"),
    ("mark", "Mark"),
    ("luke", "Luke"),
    ("john", "John"),
    ("acts", "Acts"),
    ("rom", "Romans"),
    ("1cor", "1 Corinthians"),
    ("1corinthians", "1 Corinthians"),
    ("2cor", "2 Corinthians"),
    ("2corinthians", "2 Corinthians"),
    ("gal", "Galatians"),
    ("eph", "Ephesians"),
    ("phil", "Philippians"),
    ("col", "Colossians"),
    ("1thess", "1 Thessalonians"),
    ("1thessalonians", "1 Thessalonians"),
    ("2thess", "2 Thessalonians"),
    ("2thessalonians", "2 Thessalonians"),
    ("1tim", "1 Timothy"),
    ("1timothy", "1 Timothy"),
    ("2tim", "2 Timothy"),
    ("2timothy", "2 Timothy"),
    ("titus", "Titus"),
    ("philem", "Philemon"),
    ("heb", "Hebrews"),
    ("james", "James"),
    ("jas", "James"),
    ("1pet", "1 Peter"),
    ("1peter", "1 Peter"),
    ("2pet", "2 Peter"),
    ("2peter", "2 Peter"),
    ("1john", "1 John"),
    ("2john", "2 John"),
    ("3john", "3 John"),
    ("jude", "Jude"),
    ("rev", "Revelation"),
    ("revelations", "Revelation"),
];

lazy_static! {
    static ref STANDARD: Arc<BookTable> =
        Arc::new(BookTable::from_pairs(STANDARD_ABBREVIATIONS.iter().copied()));
}

/// Read-only mapping from lookup keys to canonical book names.
///
/// Keys are stored in lookup-key form (see [`lookup_key`]), so `"1 Cor."`,
/// `"1cor"` and `"1COR"` all hit the same entry.
#[derive(Debug, Clone, Default)]
pub struct BookTable {
    aliases: HashMap<String, String>,
}

impl BookTable {
    /// The built-in abbreviation table, built on first use.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Shared handle to the built-in table.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// Build a table from `(alias, canonical name)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let aliases = pairs
            .into_iter()
            .map(|(alias, name)| (lookup_key(alias.as_ref()), name.into()))
            .collect();
        Self { aliases }
    }

    /// Canonical name for a token, if the table knows it.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.aliases.get(&lookup_key(token)).map(String::as_str)
    }

    /// Number of aliases in the table.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Normalize a raw book token to the name used for chapter folders.
    ///
    /// Unknown tokens are title-cased word by word and otherwise kept as
    /// written, so a book missing from the table can still resolve if its
    /// folder happens to match.
    pub fn normalize(&self, token: &str) -> String {
        self.get(token).map_or_else(|| title_case(token), str::to_string)
    }
}

/// Normalize a book token with the built-in table.
pub fn normalize_book_name(token: &str) -> String {
    BookTable::standard().normalize(token)
}

/// Reduce a token to lowercase ASCII letters and digits.
pub fn lookup_key(token: &str) -> String {
    token
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Collapse whitespace runs and uppercase the first letter of each word.
fn title_case(token: &str) -> String {
    token
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
