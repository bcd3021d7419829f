use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, GenerateFocus};
use crate::ui::{quiz, spinner_frame};

/// Longest preview summary slice shown under the input.
const PREVIEW_SUMMARY_CHARS: usize = 200;

/// Input card on top, quiz body below.
pub fn split_main(main: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(main);
    (vertical[0], vertical[1])
}

/// Where the generated quiz renders: the body minus the provenance line.
pub fn quiz_rect(main: Rect) -> Rect {
    let (_, body) = split_main(main);
    Rect {
        x: body.x,
        y: body.y + 1,
        width: body.width,
        height: body.height.saturating_sub(1),
    }
}

pub fn draw_generate(f: &mut Frame, main: Rect, state: &AppState) {
    let (card, body) = split_main(main);
    draw_input_card(f, card, state);

    if state.generating {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} Generating quiz — this may take a few seconds...",
                    spinner_frame(state.tick)
                ),
                Style::default().fg(Color::Yellow),
            )),
        ];
        let widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(widget, body);
    } else if let Some(take) = &state.generated {
        let provenance = Line::from(vec![
            Span::styled("  Generated from: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                take.quiz.url.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]);
        f.render_widget(
            Paragraph::new(provenance),
            Rect {
                height: 1,
                ..body
            },
        );
        quiz::draw_quiz(f, quiz_rect(main), take, state.focus == GenerateFocus::Quiz);
    } else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Paste a Wikipedia article URL above and press Enter to generate a quiz.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let widget =
            Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
        f.render_widget(widget, body);
    }
}

fn draw_input_card(f: &mut Frame, card: Rect, state: &AppState) {
    let editing = state.focus == GenerateFocus::UrlInput && !state.has_dialog();
    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let inner_width = card.width.saturating_sub(4) as usize;

    let mut lines = vec![input_line(state, inner_width, editing)];

    if state.preview_loading {
        lines.push(Line::from(Span::styled(
            format!(" {} Fetching preview...", spinner_frame(state.tick)),
            Style::default().fg(Color::DarkGray),
        )));
    } else if let Some(preview) = &state.preview {
        let mut text = preview.title.clone();
        if let Some(summary) = &preview.summary {
            let short: String = summary.chars().take(PREVIEW_SUMMARY_CHARS).collect();
            text.push_str(" — ");
            text.push_str(&short);
            if summary.chars().count() > PREVIEW_SUMMARY_CHARS {
                text.push_str("...");
            }
        }
        lines.push(Line::from(vec![
            Span::styled(" Preview: ", Style::default().fg(Color::DarkGray)),
            Span::styled(text, Style::default().fg(Color::Gray)),
        ]));
    } else {
        lines.push(Line::from(""));
    }

    match &state.input_error {
        Some(message) => lines.push(Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Wikipedia URL ")
        .border_style(border_style);
    f.render_widget(Paragraph::new(lines).block(block), card);
}

/// The URL field with a block cursor, windowed so the cursor stays visible
/// on long URLs.
fn input_line(state: &AppState, inner_width: usize, editing: bool) -> Line<'static> {
    let chars: Vec<char> = state.url_input.chars().collect();
    if chars.is_empty() && !editing {
        return Line::from(Span::styled(
            " https://en.wikipedia.org/wiki/...",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let cursor = state.url_cursor.min(chars.len());
    let window = inner_width.saturating_sub(1).max(1);
    let start = cursor.saturating_sub(window);
    let visible: String = chars.iter().skip(start).take(window).collect();
    let cursor_in_window = cursor - start;

    let mut spans = vec![Span::raw(" ")];
    if editing {
        let before: String = visible.chars().take(cursor_in_window).collect();
        let at: String = visible
            .chars()
            .nth(cursor_in_window)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = visible.chars().skip(cursor_in_window + 1).collect();
        spans.push(Span::styled(before, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            at,
            Style::default().fg(Color::Black).bg(Color::White),
        ));
        spans.push(Span::styled(after, Style::default().fg(Color::White)));
    } else {
        spans.push(Span::styled(visible, Style::default().fg(Color::White)));
    }
    Line::from(spans)
}
