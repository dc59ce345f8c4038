use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::anyhow;

/// The five books of the Torah, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Book {
    Genesis,
    Exodus,
    Leviticus,
    Numbers,
    Deuteronomy,
}

impl Book {
    pub fn all() -> [Book; 5] {
        [
            Book::Genesis,
            Book::Exodus,
            Book::Leviticus,
            Book::Numbers,
            Book::Deuteronomy,
        ]
    }

    /// English name, as used in text service references.
    pub fn as_str(&self) -> &'static str {
        match self {
            Book::Genesis => "Genesis",
            Book::Exodus => "Exodus",
            Book::Leviticus => "Leviticus",
            Book::Numbers => "Numbers",
            Book::Deuteronomy => "Deuteronomy",
        }
    }

    pub fn hebrew_name(&self) -> &'static str {
        match self {
            Book::Genesis => "Bereshit",
            Book::Exodus => "Shemot",
            Book::Leviticus => "Vayikra",
            Book::Numbers => "Bamidbar",
            Book::Deuteronomy => "Devarim",
        }
    }

    pub fn chapter_count(&self) -> u32 {
        chapter_count(*self)
    }

    pub fn chapters(&self) -> RangeInclusive<u32> {
        1..=self.chapter_count()
    }

    pub fn contains_chapter(&self, chapter: u32) -> bool {
        self.chapters().contains(&chapter)
    }
}

/// Number of chapters in `book`.
pub fn chapter_count(book: Book) -> u32 {
    match book {
        Book::Genesis => 50,
        Book::Exodus => 40,
        Book::Leviticus => 27,
        Book::Numbers => 36,
        Book::Deuteronomy => 34,
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Book {
    type Err = anyhow::Error;

    /// Accepts the English or transliterated Hebrew name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Book::all()
            .into_iter()
            .find(|b| b.as_str().to_lowercase() == wanted || b.hebrew_name().to_lowercase() == wanted)
            .ok_or_else(|| anyhow!("Unknown book '{}'. Expected one of: {}", s, book_list()))
    }
}

fn book_list() -> String {
    Book::all()
        .iter()
        .map(|b| b.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
