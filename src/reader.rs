//! UI-agnostic reading state.
//!
//! Holds the current book/chapter selection and the verses on display. Every
//! selection change advances a request token; a fetch result is only accepted
//! when it carries the current token, so a slow response for an earlier
//! selection can never overwrite a newer one.

use tracing::{debug, warn};

use crate::catalog::Book;
use crate::error::FetchError;
use crate::sefaria::Verse;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// A fetch the caller must perform for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterRequest {
    pub token: u64,
    pub book: Book,
    pub chapter: u32,
}

#[derive(Debug, Default)]
pub struct ReaderState {
    selected_book: Option<Book>,
    selected_chapter: Option<u32>,
    verses: Vec<Verse>,
    request_token: u64,
    status: LoadStatus,
}

impl ReaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_book(&self) -> Option<Book> {
        self.selected_book
    }

    pub fn selected_chapter(&self) -> Option<u32> {
        self.selected_chapter
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[cfg(test)]
    pub fn request_token(&self) -> u64 {
        self.request_token
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Number of chapter options for the selected book, 0 when none is selected.
    pub fn chapter_count(&self) -> u32 {
        self.selected_book.map(|b| b.chapter_count()).unwrap_or(0)
    }

    /// Select a book, dropping any chapter selection and verses.
    pub fn select_book(&mut self, book: Book) -> u32 {
        self.selected_book = Some(book);
        self.selected_chapter = None;
        self.verses.clear();
        self.status = LoadStatus::Idle;
        self.advance_token();
        book.chapter_count()
    }

    /// Select a chapter of the current book. Returns the request to run, or
    /// `None` (leaving state untouched) when no book is selected or the
    /// chapter is out of range.
    pub fn select_chapter(&mut self, chapter: u32) -> Option<ChapterRequest> {
        let book = self.selected_book?;
        if !book.contains_chapter(chapter) {
            return None;
        }

        self.selected_chapter = Some(chapter);
        self.verses.clear();
        self.status = LoadStatus::Loading;
        let token = self.advance_token();

        Some(ChapterRequest { token, book, chapter })
    }

    /// Re-issue the current selection, e.g. after a failed fetch.
    pub fn reload(&mut self) -> Option<ChapterRequest> {
        let chapter = self.current_request()?.chapter;
        self.select_chapter(chapter)
    }

    /// The request matching the current selection, without changing state.
    pub fn current_request(&self) -> Option<ChapterRequest> {
        Some(ChapterRequest {
            token: self.request_token,
            book: self.selected_book?,
            chapter: self.selected_chapter?,
        })
    }

    /// Apply a finished fetch. Returns false when the result was stale and dropped.
    pub fn apply_response(&mut self, token: u64, result: Result<Vec<Verse>, FetchError>) -> bool {
        if token != self.request_token {
            debug!(token, current = self.request_token, "dropping stale chapter response");
            return false;
        }

        match result {
            Ok(verses) => {
                self.verses = verses;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!(
                    book = ?self.selected_book,
                    chapter = ?self.selected_chapter,
                    error = %e,
                    "failed to load chapter"
                );
                self.verses.clear();
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.selected_book = None;
        self.selected_chapter = None;
        self.verses.clear();
        self.status = LoadStatus::Idle;
        self.advance_token();
    }

    fn advance_token(&mut self) -> u64 {
        self.request_token += 1;
        self.request_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetrievalError;

    fn verses(tag: &str, n: usize) -> Vec<Verse> {
        (1..=n)
            .map(|i| Verse {
                hebrew: format!("{tag} he {i}"),
                english: format!("{tag} en {i}"),
            })
            .collect()
    }

    #[test]
    fn test_select_book_yields_chapter_options() {
        let mut state = ReaderState::new();
        assert_eq!(state.chapter_count(), 0);
        assert_eq!(state.select_book(Book::Genesis), 50);
        assert_eq!(state.chapter_count(), 50);
    }

    #[test]
    fn test_switching_book_resets_chapter_and_verses() {
        let mut state = ReaderState::new();
        state.select_book(Book::Genesis);
        let req = state.select_chapter(3).unwrap();
        assert!(state.apply_response(req.token, Ok(verses("gen3", 4))));
        assert_eq!(state.verses().len(), 4);

        assert_eq!(state.select_book(Book::Exodus), 40);
        assert_eq!(state.selected_chapter(), None);
        assert!(state.verses().is_empty());
        assert_eq!(state.status(), &LoadStatus::Idle);
    }

    #[test]
    fn test_response_for_previous_book_is_dropped() {
        let mut state = ReaderState::new();
        state.select_book(Book::Genesis);
        let req = state.select_chapter(1).unwrap();
        state.select_book(Book::Exodus);

        assert!(!state.apply_response(req.token, Ok(verses("gen1", 31))));
        assert!(state.verses().is_empty());
    }

    #[test]
    fn test_failed_retrieval_leaves_empty_list() {
        let mut state = ReaderState::new();
        state.select_book(Book::Genesis);
        let req = state.select_chapter(1).unwrap();

        let err = FetchError::Retrieval(RetrievalError::Service("network down".into()));
        assert!(state.apply_response(req.token, Err(err)));
        assert!(state.verses().is_empty());
        assert!(matches!(state.status(), LoadStatus::Failed(msg) if msg.contains("network down")));
    }

    #[test]
    fn test_out_of_order_responses_keep_latest_chapter() {
        let mut state = ReaderState::new();
        state.select_book(Book::Genesis);
        let first = state.select_chapter(1).unwrap();
        let second = state.select_chapter(2).unwrap();
        assert!(second.token > first.token);

        assert!(state.apply_response(second.token, Ok(verses("gen2", 25))));
        assert!(!state.apply_response(first.token, Ok(verses("gen1", 31))));

        assert_eq!(state.selected_chapter(), Some(2));
        assert_eq!(state.verses().len(), 25);
        assert_eq!(state.verses()[0].english, "gen2 en 1");
        assert_eq!(state.status(), &LoadStatus::Loaded);
    }

    #[test]
    fn test_stale_failure_does_not_clear_fresh_verses() {
        let mut state = ReaderState::new();
        state.select_book(Book::Numbers);
        let first = state.select_chapter(5).unwrap();
        let second = state.select_chapter(6).unwrap();
        state.apply_response(second.token, Ok(verses("num6", 3)));

        let err = FetchError::DataShape { original: 2, translated: 1 };
        assert!(!state.apply_response(first.token, Err(err)));
        assert_eq!(state.verses().len(), 3);
    }

    #[test]
    fn test_select_chapter_requires_book_and_range() {
        let mut state = ReaderState::new();
        assert!(state.select_chapter(1).is_none());

        state.select_book(Book::Leviticus);
        let token = state.request_token();
        assert!(state.select_chapter(0).is_none());
        assert!(state.select_chapter(28).is_none());
        assert_eq!(state.request_token(), token);
        assert!(state.select_chapter(27).is_some());
        assert!(state.is_loading());
    }

    #[test]
    fn test_reload_issues_fresh_token() {
        let mut state = ReaderState::new();
        assert!(state.reload().is_none());

        state.select_book(Book::Deuteronomy);
        let first = state.select_chapter(34).unwrap();
        let again = state.reload().unwrap();
        assert_eq!((again.book, again.chapter), (Book::Deuteronomy, 34));
        assert!(again.token > first.token);
        assert_eq!(state.current_request(), Some(again));
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut state = ReaderState::new();
        state.select_book(Book::Exodus);
        let req = state.select_chapter(20).unwrap();
        state.reset();

        assert!(!state.apply_response(req.token, Ok(verses("ex20", 26))));
        assert_eq!(state.selected_book(), None);
        assert!(state.current_request().is_none());
    }
}
