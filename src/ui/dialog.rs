use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::{AppState, Dialog};

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::Error(message) => draw_error(f, area, message),
        Dialog::Help => draw_help(f, area),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_error(f: &mut Frame, area: Rect, message: &str) {
    let width = 52u16.min(area.width);
    let text_width = width.saturating_sub(6) as usize;
    let text_lines = if text_width == 0 {
        1
    } else {
        message.chars().count().div_ceil(text_width).max(1)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Something went wrong",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::raw(format!("   {}", message))),
    ];
    for _ in 1..text_lines {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "   [Enter] OK",
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(""));

    let rect = centered_rect(width, lines.len() as u16, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, rect);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   Tab        Switch tab"),
        Line::from("   Enter      Generate quiz / open details"),
        Line::from("   Ctrl+P     Preview article"),
        Line::from("   arrows     Previous/Next question or row"),
        Line::from("   a-z        Select answer option"),
        Line::from("   Ctrl+S     Submit answers"),
        Line::from("   Ctrl+R     Retake quiz"),
        Line::from("   r          Reload history"),
        Line::from("   Esc        Close overlay / back to URL"),
        Line::from("   Ctrl+Q     Quit"),
        Line::from("   ?          This help"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let rect = centered_rect(46, lines.len() as u16, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}
