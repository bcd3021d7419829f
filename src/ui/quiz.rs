use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::session::OptionMark;
use crate::state::QuizTake;

/// How many sections / related topics the header shows.
const HEADER_TOPICS: usize = 5;

/// One clickable option: the content lines it occupies.
pub struct OptionRow {
    pub line: usize,
    pub rows: usize,
    pub question: usize,
    pub option: usize,
}

impl OptionRow {
    pub fn contains(&self, line: usize) -> bool {
        line >= self.line && line < self.line + self.rows
    }
}

/// The quiz rendered as a flat list of lines, plus the rows that react to
/// clicks. Built identically by draw and by the mouse handler so hit testing
/// cannot drift from the layout.
pub struct QuizLines {
    pub lines: Vec<Line<'static>>,
    pub question_rows: Vec<(usize, usize)>,
    pub option_rows: Vec<OptionRow>,
    pub submit_row: Option<usize>,
    pub retake_row: Option<usize>,
}

pub fn build_quiz_lines(take: &QuizTake, width: u16, focused: bool) -> QuizLines {
    let quiz = &take.quiz;
    let session = &take.session;
    let submitted = session.submitted();
    let wrap_width = (width as usize).saturating_sub(4).max(10);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut question_rows: Vec<(usize, usize)> = Vec::new();
    let mut option_rows: Vec<OptionRow> = Vec::new();

    // Header: title, summary, sections, related topics.
    for wline in wrap_text(quiz.display_title(), wrap_width) {
        lines.push(Line::from(Span::styled(
            format!("  {}", wline),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(summary) = &quiz.summary {
        for wline in wrap_text(summary, wrap_width) {
            lines.push(Line::from(Span::styled(
                format!("  {}", wline),
                Style::default().fg(Color::Gray),
            )));
        }
    }
    lines.push(topic_line("Sections", &quiz.sections));
    lines.push(topic_line("Related", &quiz.related_topics));
    lines.push(Line::from(""));

    if quiz.questions.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No questions generated.",
            Style::default().fg(Color::DarkGray),
        )));
        return QuizLines {
            lines,
            question_rows,
            option_rows,
            submit_row: None,
            retake_row: None,
        };
    }

    for (qi, question) in quiz.questions.iter().enumerate() {
        question_rows.push((lines.len(), qi));

        let is_current = focused && take.cursor == qi;
        let marker = if is_current { "▸ " } else { "  " };
        let header_style = if is_current {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        for (li, wline) in wrap_text(
            &format!("Q{}. {}", qi + 1, question.text),
            wrap_width.saturating_sub(2),
        )
        .into_iter()
        .enumerate()
        {
            let prefix = if li == 0 { marker } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{}{}", prefix, wline),
                header_style,
            )));
        }

        let mut meta = format!("    Difficulty: {}", capitalize(&question.difficulty));
        if question.explanation.is_some() && !submitted {
            meta.push_str("   · explanation available");
        }
        lines.push(Line::from(Span::styled(
            meta,
            Style::default().fg(Color::DarkGray),
        )));

        for (oi, option) in question.options.iter().enumerate() {
            let first_line = lines.len();

            let mark = session.mark(quiz, qi, option);
            let selected = session.selected(qi) == Some(option.as_str());
            let radio = if selected { "(●)" } else { "( )" };
            let style = match mark {
                OptionMark::Correct => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                OptionMark::Wrong => Style::default().fg(Color::Red),
                OptionMark::Selected => Style::default().fg(Color::Cyan),
                OptionMark::Neutral => Style::default(),
            };

            let letter = if oi < 26 {
                (b'a' + oi as u8) as char
            } else {
                '?'
            };
            let prefix = format!("    {} {}. ", radio, letter);
            let prefix_len = prefix.chars().count();
            let text_width = (width as usize).saturating_sub(prefix_len + 2).max(10);
            let wrapped = wrap_text(option, text_width);
            option_rows.push(OptionRow {
                line: first_line,
                rows: wrapped.len(),
                question: qi,
                option: oi,
            });
            for (li, wline) in wrapped.into_iter().enumerate() {
                if li == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(prefix.clone(), style),
                        Span::styled(wline, style),
                    ]));
                } else {
                    lines.push(Line::from(vec![
                        Span::raw(" ".repeat(prefix_len)),
                        Span::styled(wline, style),
                    ]));
                }
            }
        }

        if submitted {
            lines.push(Line::from(vec![
                Span::styled("    Correct answer: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    question.answer.clone(),
                    Style::default().fg(Color::Green),
                ),
            ]));
            if let Some(explanation) = &question.explanation {
                for wline in wrap_text(explanation, wrap_width.saturating_sub(2)) {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", wline),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
        }
        lines.push(Line::from(""));
    }

    // Footer: submit before submission, score + retake after.
    let total = quiz.questions.len();
    let mut submit_row = None;
    let mut retake_row = None;
    if !submitted {
        submit_row = Some(lines.len());
        lines.push(Line::from(vec![
            Span::styled(
                "  [Ctrl+S] Submit answers",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   {} of {} answered", session.answered_count(), total),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("Score: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{} / {}", session.score(quiz), total),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        retake_row = Some(lines.len());
        lines.push(Line::from(Span::styled(
            "  [Ctrl+R] Retake",
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )));
    }

    QuizLines {
        lines,
        question_rows,
        option_rows,
        submit_row,
        retake_row,
    }
}

/// Scroll offset that keeps the current question's header near the top of
/// the viewport. Derived per frame; draw and hit testing share it.
pub fn scroll_offset(built: &QuizLines, take: &QuizTake, viewport: usize) -> usize {
    let max_scroll = built.lines.len().saturating_sub(viewport);
    let header_line = built
        .question_rows
        .iter()
        .find(|&&(_, qi)| qi == take.cursor)
        .map(|&(line, _)| line)
        .unwrap_or(0);
    header_line.saturating_sub(2).min(max_scroll)
}

pub fn draw_quiz(f: &mut Frame, area: Rect, take: &QuizTake, focused: bool) {
    let built = build_quiz_lines(take, area.width, focused);
    let viewport = area.height as usize;
    let scroll = scroll_offset(&built, take, viewport);
    let total = built.lines.len();

    let display: Vec<Line> = built.lines.into_iter().skip(scroll).collect();
    f.render_widget(Paragraph::new(display), area);

    if total > viewport {
        let mut scrollbar_state = ScrollbarState::new(total)
            .position(scroll)
            .viewport_content_length(viewport);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn topic_line(label: &str, topics: &[String]) -> Line<'static> {
    let shown: Vec<&str> = topics
        .iter()
        .take(HEADER_TOPICS)
        .map(String::as_str)
        .collect();
    let text = if shown.is_empty() {
        "-".to_string()
    } else {
        shown.join(" · ")
    };
    Line::from(vec![
        Span::styled(
            format!("  {}: ", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(text, Style::default().fg(Color::Magenta)),
    ])
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Wrap text to fit within `width` columns, breaking at word boundaries.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            result.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}
