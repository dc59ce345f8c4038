use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, FocusPane};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::ChapterLoaded { token, result } => app.apply_chapter_response(token, result),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus == FocusPane::Navigation {
                app.nav_down();
            } else {
                app.scroll_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus == FocusPane::Navigation {
                app.nav_up();
            } else {
                app.scroll_up();
            }
        }
        KeyCode::Char('g') => {
            if app.focus == FocusPane::Navigation {
                app.nav_first();
            } else {
                app.scroll_to_top();
            }
        }
        KeyCode::Char('G') => {
            if app.focus == FocusPane::Navigation {
                app.nav_last();
            } else {
                app.scroll_to_bottom();
            }
        }

        // Enter/Select
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            if app.focus == FocusPane::Navigation {
                app.nav_enter();
            }
        }

        // Back
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => {
            if app.focus == FocusPane::Content {
                app.focus = FocusPane::Navigation;
            } else {
                app.nav_back();
            }
        }

        KeyCode::Tab => {
            app.focus = match app.focus {
                FocusPane::Navigation => FocusPane::Content,
                FocusPane::Content => FocusPane::Navigation,
            };
        }

        // Half-page scroll
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }

        // Retry the current chapter
        KeyCode::Char('r') => app.reload(),

        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);
    let in_nav = app.nav_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_content = app.content_area.is_some_and(|r| point_in_rect(x, y, r));

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_content {
                for _ in 0..3 {
                    app.scroll_down();
                }
            } else if in_nav {
                app.nav_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_content {
                for _ in 0..3 {
                    app.scroll_up();
                }
            } else if in_nav {
                app.nav_up();
            }
        }
        MouseEventKind::Down(_) => {
            if in_nav {
                app.focus = FocusPane::Navigation;
            } else if in_content {
                app.focus = FocusPane::Content;
            }
        }
        _ => {}
    }
}
