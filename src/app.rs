use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::catalog::Book;
use crate::error::FetchError;
use crate::reader::{ChapterRequest, LoadStatus, ReaderState};
use crate::sefaria::{SefariaClient, Verse};
use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLevel {
    Book,
    Chapter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Navigation,
    Content,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub focus: FocusPane,

    // Navigation state
    pub nav_level: NavLevel,
    pub book_state: ListState,
    pub chapter_state: ListState,

    // Content state
    pub content_scroll: u16,
    pub content_height: u16,
    pub total_content_lines: u16,

    // Panel areas for mouse hit-testing (updated during render)
    pub nav_area: Option<Rect>,
    pub content_area: Option<Rect>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Selection and verses
    pub reader: ReaderState,

    client: SefariaClient,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(client: SefariaClient, events: UnboundedSender<AppEvent>) -> Self {
        let mut book_state = ListState::default();
        book_state.select(Some(0));

        Self {
            should_quit: false,
            focus: FocusPane::Navigation,

            nav_level: NavLevel::Book,
            book_state,
            chapter_state: ListState::default(),

            content_scroll: 0,
            content_height: 0,
            total_content_lines: 0,

            nav_area: None,
            content_area: None,

            animation_frame: 0,

            reader: ReaderState::new(),

            client,
            events,
        }
    }

    // Navigation helpers
    pub fn books(&self) -> [Book; 5] {
        Book::all()
    }

    /// Chapter numbers offered for the selected book.
    pub fn chapter_options(&self) -> Vec<u32> {
        self.reader
            .selected_book()
            .map(|b| b.chapters().collect())
            .unwrap_or_default()
    }

    /// Book under the cursor (not necessarily selected).
    pub fn highlighted_book(&self) -> Option<Book> {
        self.book_state.selected().and_then(|i| self.books().get(i).copied())
    }

    /// Chapter under the cursor (not necessarily loaded).
    pub fn highlighted_chapter(&self) -> Option<u32> {
        let count = self.reader.chapter_count() as usize;
        self.chapter_state
            .selected()
            .filter(|&i| i < count)
            .map(|i| i as u32 + 1)
    }

    fn nav_len(&self) -> usize {
        match self.nav_level {
            NavLevel::Book => self.books().len(),
            NavLevel::Chapter => self.reader.chapter_count() as usize,
        }
    }

    fn nav_state(&mut self) -> &mut ListState {
        match self.nav_level {
            NavLevel::Book => &mut self.book_state,
            NavLevel::Chapter => &mut self.chapter_state,
        }
    }

    // Navigation actions
    pub fn nav_down(&mut self) {
        let len = self.nav_len();
        if len > 0 {
            let state = self.nav_state();
            let i = state.selected().unwrap_or(0);
            state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn nav_up(&mut self) {
        let state = self.nav_state();
        let i = state.selected().unwrap_or(0);
        state.select(Some(i.saturating_sub(1)));
    }

    pub fn nav_first(&mut self) {
        self.nav_state().select(Some(0));
    }

    pub fn nav_last(&mut self) {
        let len = self.nav_len();
        if len > 0 {
            self.nav_state().select(Some(len - 1));
        }
    }

    pub fn nav_enter(&mut self) {
        match self.nav_level {
            NavLevel::Book => {
                if let Some(book) = self.highlighted_book() {
                    self.choose_book(book);
                }
            }
            NavLevel::Chapter => {
                let Some(chapter) = self.highlighted_chapter() else { return };
                let already_shown = self.reader.selected_chapter() == Some(chapter)
                    && !matches!(self.reader.status(), LoadStatus::Failed(_));
                if already_shown {
                    // Enter on the chapter being read focuses the content pane
                    self.focus = FocusPane::Content;
                } else {
                    self.choose_chapter(chapter);
                }
            }
        }
    }

    pub fn nav_back(&mut self) {
        match self.nav_level {
            NavLevel::Book => {
                // Already at top, do nothing
            }
            NavLevel::Chapter => {
                self.nav_level = NavLevel::Book;
                self.chapter_state.select(None);
                self.reader.reset();
                self.content_scroll = 0;
                self.focus = FocusPane::Navigation;
            }
        }
    }

    /// Select a book and move to its chapter list.
    pub fn choose_book(&mut self, book: Book) {
        let count = self.reader.select_book(book);
        info!(%book, chapters = count, "book selected");
        if let Some(idx) = self.books().iter().position(|b| *b == book) {
            self.book_state.select(Some(idx));
        }
        self.chapter_state.select(if count > 0 { Some(0) } else { None });
        self.nav_level = NavLevel::Chapter;
        self.content_scroll = 0;
    }

    /// Select a chapter of the current book and start fetching it.
    pub fn choose_chapter(&mut self, chapter: u32) {
        if let Some(request) = self.reader.select_chapter(chapter) {
            self.chapter_state.select(Some(chapter as usize - 1));
            self.content_scroll = 0;
            self.spawn_fetch(request);
        }
    }

    /// Fetch the current chapter again.
    pub fn reload(&mut self) {
        if let Some(request) = self.reader.reload() {
            self.content_scroll = 0;
            self.spawn_fetch(request);
        }
    }

    fn spawn_fetch(&self, request: ChapterRequest) {
        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = client.fetch_verses(request.book, request.chapter).await;
            // The loop may already be gone on shutdown
            let _ = tx.send(AppEvent::ChapterLoaded {
                token: request.token,
                result,
            });
        });
    }

    pub fn apply_chapter_response(&mut self, token: u64, result: Result<Vec<Verse>, FetchError>) {
        if self.reader.apply_response(token, result) {
            self.content_scroll = 0;
        }
    }

    // Content scrolling
    pub fn scroll_down(&mut self) {
        if self.content_scroll < self.total_content_lines.saturating_sub(self.content_height) {
            self.content_scroll = self.content_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.content_scroll = self.content_scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half_page = self.content_height / 2;
        let max_scroll = self.total_content_lines.saturating_sub(self.content_height);
        self.content_scroll = (self.content_scroll + half_page).min(max_scroll);
    }

    pub fn scroll_half_page_up(&mut self) {
        let half_page = self.content_height / 2;
        self.content_scroll = self.content_scroll.saturating_sub(half_page);
    }

    pub fn scroll_to_top(&mut self) {
        self.content_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.content_scroll = self.total_content_lines.saturating_sub(self.content_height);
    }

    // Title helpers
    pub fn current_nav_title(&self) -> String {
        match self.nav_level {
            NavLevel::Book => "Books".to_string(),
            NavLevel::Chapter => self
                .reader
                .selected_book()
                .map(|b| b.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn content_title(&self) -> String {
        match (self.reader.selected_book(), self.reader.selected_chapter()) {
            (Some(book), Some(chapter)) => format!("{} {} · {}", book, chapter, book.hebrew_name()),
            _ => "Select a chapter".to_string(),
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.reader.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
