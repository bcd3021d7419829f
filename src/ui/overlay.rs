use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, Overlay};
use crate::ui::{quiz, spinner_frame};

/// The modal's footprint: centered, nearly full-screen, capped for very wide
/// terminals.
pub fn overlay_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(8).min(100).max(20).min(area.width);
    let height = area.height.saturating_sub(4).max(8).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// The modal interior, inside the border.
pub fn content_rect(area: Rect) -> Rect {
    let rect = overlay_rect(area);
    Rect {
        x: rect.x + 1,
        y: rect.y + 1,
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

pub fn draw_overlay(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(overlay) = &state.overlay else {
        return;
    };

    let rect = overlay_rect(area);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Quiz Details ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " [Esc] Close ",
            Style::default().fg(Color::DarkGray),
        )))
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, rect);

    let content = content_rect(area);
    match overlay {
        Overlay::Loading { id } => {
            let lines = vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Loading quiz #{}...", spinner_frame(state.tick), id),
                    Style::default().fg(Color::Yellow),
                )),
            ];
            let widget =
                Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
            f.render_widget(widget, content);
        }
        Overlay::Detail(take) => {
            quiz::draw_quiz(f, content, take, true);
        }
    }
}
