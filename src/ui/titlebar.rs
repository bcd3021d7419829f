use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Tab};

const TITLE: &str = " Wiki Quiz ";
const GENERATE_LABEL: &str = "  Generate Quiz  ";
const HISTORY_LABEL: &str = "  Past Quizzes  ";

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let tab_style = |active: bool| {
        if active {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        }
    };

    let line = Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(GENERATE_LABEL, tab_style(state.tab == Tab::Generate)),
        Span::styled(HISTORY_LABEL, tab_style(state.tab == Tab::History)),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    f.render_widget(widget, area);
}

/// Which tab label a titlebar click at column `x` lands on. Mirrors the span
/// order in `draw_titlebar`.
pub fn tab_at(x: u16) -> Option<Tab> {
    let title_end = TITLE.chars().count() as u16;
    let generate_end = title_end + GENERATE_LABEL.chars().count() as u16;
    let history_end = generate_end + HISTORY_LABEL.chars().count() as u16;

    if x >= title_end && x < generate_end {
        Some(Tab::Generate)
    } else if x >= generate_end && x < history_end {
        Some(Tab::History)
    } else {
        None
    }
}
