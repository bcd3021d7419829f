use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, GenerateFocus, Overlay, Tab};

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let bindings: Vec<(&str, &str)> = if state.has_dialog() {
        vec![("Enter/Esc", "close")]
    } else if let Some(overlay) = &state.overlay {
        match overlay {
            Overlay::Loading { .. } => vec![("Esc", "close"), ("Ctrl+Q", "quit")],
            Overlay::Detail(_) => vec![
                ("↑/↓", "question"),
                ("a-z", "answer"),
                ("Ctrl+S", "submit"),
                ("Ctrl+R", "retake"),
                ("Esc", "close"),
            ],
        }
    } else {
        match state.tab {
            Tab::Generate => match state.focus {
                GenerateFocus::UrlInput => vec![
                    ("Enter", "generate"),
                    ("Ctrl+P", "preview"),
                    ("↓", "quiz"),
                    ("Tab", "history"),
                    ("Ctrl+Q", "quit"),
                ],
                GenerateFocus::Quiz => vec![
                    ("↑/↓", "question"),
                    ("a-z", "answer"),
                    ("Ctrl+S", "submit"),
                    ("Ctrl+R", "retake"),
                    ("Esc", "edit URL"),
                    ("Tab", "history"),
                ],
            },
            Tab::History => vec![
                ("↑/↓", "row"),
                ("Enter", "details"),
                ("r", "reload"),
                ("Tab", "generate"),
                ("?", "help"),
                ("Ctrl+Q", "quit"),
            ],
        }
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
