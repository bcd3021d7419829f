use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;
use crate::timefmt::format_local;
use crate::ui::spinner_frame;

/// Header line, status line, column header.
const HEADER_ROWS: u16 = 3;
const ID_WIDTH: usize = 5;
const DATE_WIDTH: usize = 17;
const RELOAD_LABEL: &str = "[r] Reload";

pub fn draw_history(f: &mut Frame, area: Rect, state: &AppState) {
    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    // Title row with the reload control (or the in-flight spinner) on the right.
    let title = " Past Quizzes";
    let right = if state.history_loading {
        format!("{} Loading...  ", spinner_frame(state.tick))
    } else {
        format!("{}  ", RELOAD_LABEL)
    };
    let pad = width.saturating_sub(title.chars().count() + right.chars().count());
    lines.push(Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(pad)),
        Span::styled(
            right,
            if state.history_loading {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
    ]));

    match &state.history_error {
        Some(message) => lines.push(Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }

    let (title_width, url_width) = column_widths(width);
    lines.push(Line::from(Span::styled(
        format!(
            "  {:>id$}  {:<date$}  {:<title$}  URL",
            "ID",
            "Date",
            "Title",
            id = ID_WIDTH,
            date = DATE_WIDTH,
            title = title_width,
        ),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::UNDERLINED),
    )));

    let visible = area.height.saturating_sub(HEADER_ROWS) as usize;
    if state.history_rows.is_empty() {
        if state.history_loaded_once && !state.history_loading {
            lines.push(Line::from(Span::styled(
                "  No history found.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    } else {
        let scroll = scroll_offset(state, visible);
        for (i, row) in state
            .history_rows
            .iter()
            .enumerate()
            .skip(scroll)
            .take(visible)
        {
            let is_current = i == state.history_cursor;
            let marker = if is_current { "▸ " } else { "  " };
            let style = if is_current {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let date = format_local(row.date_generated.as_deref());
            let title = row.title.as_deref().unwrap_or("-");
            let line = format!(
                "{}{:>id$}  {:<date$}  {:<title$}  {}",
                marker,
                row.id,
                truncate(&date, DATE_WIDTH),
                truncate(title, title_width),
                truncate(&row.url, url_width),
                id = ID_WIDTH,
                date = DATE_WIDTH,
                title = title_width,
            );
            lines.push(Line::from(Span::styled(line, style)));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// First visible row index, keeping the cursor row on screen.
pub fn scroll_offset(state: &AppState, visible: usize) -> usize {
    if visible == 0 {
        0
    } else if state.history_cursor >= visible {
        state.history_cursor + 1 - visible
    } else {
        0
    }
}

/// Which history row a click at `y` lands on.
pub fn row_at(area: Rect, state: &AppState, y: u16) -> Option<usize> {
    if y < area.y + HEADER_ROWS {
        return None;
    }
    let visible = area.height.saturating_sub(HEADER_ROWS) as usize;
    let offset = (y - area.y - HEADER_ROWS) as usize;
    if offset >= visible {
        return None;
    }
    let index = scroll_offset(state, visible) + offset;
    if index < state.history_rows.len() {
        Some(index)
    } else {
        None
    }
}

/// True when a click hits the reload control on the title row.
pub fn reload_hit(area: Rect, x: u16, y: u16) -> bool {
    let label_len = RELOAD_LABEL.chars().count() as u16 + 2;
    y == area.y && x >= area.x + area.width.saturating_sub(label_len)
}

fn column_widths(total: usize) -> (usize, usize) {
    let fixed = 2 + ID_WIDTH + 2 + DATE_WIDTH + 2;
    let rest = total.saturating_sub(fixed + 2);
    let title_width = (rest * 2 / 5).max(8);
    let url_width = rest.saturating_sub(title_width).max(8);
    (title_width, url_width)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let cut: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}
