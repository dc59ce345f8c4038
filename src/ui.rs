use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use crate::app::{App, FocusPane, NavLevel};
use crate::reader::LoadStatus;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);
    render_browse_screen(app, frame, body_area);
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Torah Reader ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = Style::default().bg(Color::Blue).fg(Color::White);

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = vec![Span::styled(" READ ", mode_style)];
    if app.focus == FocusPane::Content {
        hints.extend(vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" ^d/^u ", key_style),
            Span::styled(" page ", label_style),
        ]);
    } else {
        hints.extend(vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" nav ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" select ", label_style),
            Span::styled(" h ", key_style),
            Span::styled(" back ", label_style),
        ]);
    }
    if matches!(app.reader.status(), LoadStatus::Failed(_)) {
        hints.extend(vec![
            Span::styled(" r ", key_style),
            Span::styled(" retry ", label_style),
        ]);
    }
    hints.extend(vec![
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", label_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn render_browse_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [nav_area, content_area] = Layout::horizontal([
        Constraint::Length(24),
        Constraint::Min(0),
    ])
    .areas(area);

    app.nav_area = Some(nav_area);
    app.content_area = Some(content_area);

    render_navigation(app, frame, nav_area);
    render_content(app, frame, content_area);
}

fn render_navigation(app: &mut App, frame: &mut Frame, area: Rect) {
    let nav_focused = app.focus == FocusPane::Navigation;
    let border_color = if nav_focused { Color::Cyan } else { Color::DarkGray };

    let title = app.current_nav_title();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    let items: Vec<ListItem> = match app.nav_level {
        NavLevel::Book => app
            .books()
            .iter()
            .map(|b| ListItem::new(format!(" {} ", b)))
            .collect(),
        NavLevel::Chapter => {
            let current = app.reader.selected_chapter();
            app.chapter_options()
                .into_iter()
                .map(|c| {
                    let item = ListItem::new(format!(" Chapter {} ", c));
                    if current == Some(c) {
                        item.style(Style::default().fg(Color::Yellow))
                    } else {
                        item
                    }
                })
                .collect()
        }
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let state = match app.nav_level {
        NavLevel::Book => &mut app.book_state,
        NavLevel::Chapter => &mut app.chapter_state,
    };

    frame.render_stateful_widget(list, area, state);
}

fn render_content(app: &mut App, frame: &mut Frame, area: Rect) {
    let content_focused = app.focus == FocusPane::Content;
    let border_color = if content_focused { Color::Cyan } else { Color::DarkGray };

    let title = app.content_title();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    let inner_area = block.inner(area);
    app.content_height = inner_area.height;

    let placeholder = match app.reader.status() {
        LoadStatus::Loading => Some((
            format!("Loading{}", ".".repeat(app.animation_frame as usize + 1)),
            Style::default().fg(Color::Yellow),
        )),
        LoadStatus::Failed(message) => Some((
            format!("Could not load chapter: {}", message),
            Style::default().fg(Color::Red),
        )),
        _ if app.reader.verses().is_empty() => Some((
            "Select a book and chapter to begin reading".to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        _ => None,
    };

    if let Some((text, style)) = placeholder {
        app.total_content_lines = 0;
        let paragraph = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Each verse: number, Hebrew line (right-aligned), English line, blank
    let mut lines: Vec<Line> = Vec::new();
    for (idx, verse) in app.reader.verses().iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("{}", idx + 1),
            Style::default().fg(Color::Yellow).bold(),
        )));
        lines.push(
            Line::from(Span::styled(verse.hebrew.as_str(), Style::default().bold()))
                .alignment(Alignment::Right),
        );
        lines.push(Line::from(verse.english.as_str()));
        lines.push(Line::default());
    }

    app.total_content_lines = wrapped_line_count(&lines, inner_area.width);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.content_scroll, 0));

    frame.render_widget(paragraph, area);

    // Render scrollbar
    if app.total_content_lines > app.content_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let mut scrollbar_state = ScrollbarState::new(app.total_content_lines as usize)
            .position(app.content_scroll as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Rough rendered height of `lines` when wrapped at `width` columns.
fn wrapped_line_count(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let total: usize = lines
        .iter()
        .map(|line| {
            // Use character count, not byte length, for proper UTF-8 handling
            let chars: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
            chars.div_ceil(width).max(1)
        })
        .sum();
    total.min(u16::MAX as usize) as u16
}
