use std::io;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Rect;
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::api::{self, ApiClient, ApiEvent};
use crate::state::*;
use crate::ui;
use crate::validate;

pub fn run_tui(mut state: AppState, client: ApiClient) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let (tx, rx) = mpsc::channel::<ApiEvent>();

    let result = main_loop(&mut terminal, &mut state, &client, &tx, &rx);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::Sender<ApiEvent>,
    rx: &mpsc::Receiver<ApiEvent>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| ui::draw(f, state))
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            match event::read().map_err(|e| format!("Read error: {}", e))? {
                Event::Key(key) => handle_key(key, state, client, tx),
                Event::Mouse(mouse) => {
                    let size = terminal.size().unwrap_or_default();
                    let area = Rect::new(0, 0, size.width, size.height);
                    handle_mouse(mouse, state, client, tx, area);
                }
                _ => {}
            }
        }

        // Apply finished network calls
        while let Ok(event) = rx.try_recv() {
            handle_api(event, state);
        }

        state.tick = state.tick.wrapping_add(1);
    }

    Ok(())
}

fn handle_key(key: KeyEvent, state: &mut AppState, client: &ApiClient, tx: &mpsc::Sender<ApiEvent>) {
    // Dialogs swallow everything first
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return;
    }

    if state.overlay.is_some() {
        handle_overlay_key(key, state);
        return;
    }

    if key.code == KeyCode::Tab {
        switch_tab(state, client, tx);
        return;
    }

    match state.tab {
        Tab::Generate => handle_generate_key(key, state, client, tx),
        Tab::History => handle_history_key(key, state, client, tx),
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    match state.top_dialog() {
        Some(Dialog::Error(_)) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                state.pop_dialog();
            }
        }
        Some(Dialog::Help) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('?')) {
                state.pop_dialog();
            }
        }
        None => {}
    }
}

fn handle_overlay_key(key: KeyEvent, state: &mut AppState) {
    if key.code == KeyCode::Esc {
        state.close_overlay();
        return;
    }
    if let Some(Overlay::Detail(take)) = state.overlay.as_mut() {
        handle_take_key(key, take);
    }
}

/// Keys for whichever quiz is being taken (generate tab or overlay).
fn handle_take_key(key: KeyEvent, take: &mut QuizTake) {
    let total = take.quiz.questions.len();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        match key.code {
            KeyCode::Char('s') => take.session.submit(),
            KeyCode::Char('r') => take.session.retake(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Up => {
            take.cursor = take.cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if take.cursor + 1 < total {
                take.cursor += 1;
            }
        }
        KeyCode::PageUp => {
            take.cursor = take.cursor.saturating_sub(5);
        }
        KeyCode::PageDown => {
            if total > 0 {
                take.cursor = (take.cursor + 5).min(total - 1);
            }
        }
        KeyCode::Home => {
            take.cursor = 0;
        }
        KeyCode::End => {
            if total > 0 {
                take.cursor = total - 1;
            }
        }
        KeyCode::Char(c) if c.is_ascii_lowercase() => {
            let idx = (c as u8 - b'a') as usize;
            if let Some(question) = take.quiz.questions.get(take.cursor) {
                if idx < question.options.len() {
                    let option = question.options[idx].clone();
                    take.session.select_option(take.cursor, &option);
                }
            }
        }
        _ => {}
    }
}

fn handle_generate_key(
    key: KeyEvent,
    state: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::Sender<ApiEvent>,
) {
    match state.focus {
        GenerateFocus::UrlInput => handle_url_key(key, state, client, tx),
        GenerateFocus::Quiz => {
            if key.code == KeyCode::Esc {
                state.focus = GenerateFocus::UrlInput;
                return;
            }
            match state.generated.as_mut() {
                Some(take) => {
                    // Up past the first question returns to the URL field
                    if key.code == KeyCode::Up && take.cursor == 0 {
                        state.focus = GenerateFocus::UrlInput;
                        return;
                    }
                    if key.code == KeyCode::Char('?')
                        && !key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        state.push_dialog(Dialog::Help);
                        return;
                    }
                    handle_take_key(key, take);
                }
                None => state.focus = GenerateFocus::UrlInput,
            }
        }
    }
}

fn handle_url_key(
    key: KeyEvent,
    state: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::Sender<ApiEvent>,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('p') {
            trigger_preview(state, client, tx);
        }
        return;
    }

    match key.code {
        KeyCode::Enter => submit_generate(state, client, tx),
        KeyCode::Down => {
            if state.generated.is_some() {
                state.focus = GenerateFocus::Quiz;
            }
        }
        KeyCode::Char(c) => {
            let at = byte_index(&state.url_input, state.url_cursor);
            state.url_input.insert(at, c);
            state.url_cursor += 1;
        }
        KeyCode::Backspace => {
            if state.url_cursor > 0 {
                state.url_cursor -= 1;
                let at = byte_index(&state.url_input, state.url_cursor);
                state.url_input.remove(at);
            }
        }
        KeyCode::Delete => {
            if state.url_cursor < state.url_input.chars().count() {
                let at = byte_index(&state.url_input, state.url_cursor);
                state.url_input.remove(at);
            }
        }
        KeyCode::Left => {
            state.url_cursor = state.url_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            state.url_cursor = (state.url_cursor + 1).min(state.url_input.chars().count());
        }
        KeyCode::Home => {
            state.url_cursor = 0;
        }
        KeyCode::End => {
            state.url_cursor = state.url_input.chars().count();
        }
        _ => {}
    }
}

fn handle_history_key(
    key: KeyEvent,
    state: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::Sender<ApiEvent>,
) {
    let total = state.history_rows.len();
    match key.code {
        KeyCode::Up => {
            state.history_cursor = state.history_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.history_cursor + 1 < total {
                state.history_cursor += 1;
            }
        }
        KeyCode::Home => {
            state.history_cursor = 0;
        }
        KeyCode::End => {
            if total > 0 {
                state.history_cursor = total - 1;
            }
        }
        KeyCode::Enter => open_detail(state, client, tx),
        KeyCode::Char('r') => start_history_fetch(state, client, tx),
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        _ => {}
    }
}

fn switch_tab(state: &mut AppState, client: &ApiClient, tx: &mpsc::Sender<ApiEvent>) {
    match state.tab {
        Tab::Generate => {
            // Leaving the generate view drops the displayed quiz and its
            // answer state; the URL field and preview stay.
            state.generated = None;
            state.focus = GenerateFocus::UrlInput;
            state.tab = Tab::History;
            start_history_fetch(state, client, tx);
        }
        Tab::History => {
            state.tab = Tab::Generate;
        }
    }
}

/// Kick off (or re-kick) the history list fetch. The new generation orphans
/// any fetch still in flight.
fn start_history_fetch(state: &mut AppState, client: &ApiClient, tx: &mpsc::Sender<ApiEvent>) {
    state.history_loading = true;
    state.history_error = None;
    let generation = state.next_history_generation();
    api::spawn_history(client, generation, tx.clone());
}

fn open_detail(state: &mut AppState, client: &ApiClient, tx: &mpsc::Sender<ApiEvent>) {
    let Some(row) = state.history_rows.get(state.history_cursor) else {
        return;
    };
    let id = row.id;
    let generation = state.next_detail_generation();
    state.overlay = Some(Overlay::Loading { id });
    api::spawn_detail(client, id, generation, tx.clone());
}

fn submit_generate(state: &mut AppState, client: &ApiClient, tx: &mpsc::Sender<ApiEvent>) {
    // Only one generation at a time; the trigger is disabled, not the request cancelled
    if state.generating {
        return;
    }
    if !validate::is_wikipedia_url(&state.url_input) {
        state.input_error = Some(validate::INVALID_URL_MESSAGE.to_string());
        return;
    }
    state.input_error = None;
    state.generated = None;
    state.generating = true;
    api::spawn_generate(client, state.url_input.clone(), tx.clone());
}

fn trigger_preview(state: &mut AppState, client: &ApiClient, tx: &mpsc::Sender<ApiEvent>) {
    if !validate::is_wikipedia_url(&state.url_input) {
        state.input_error = Some(validate::INVALID_URL_MESSAGE.to_string());
        return;
    }
    state.input_error = None;
    state.preview_loading = true;
    let generation = state.next_preview_generation();
    api::spawn_preview(client, state.url_input.clone(), generation, tx.clone());
}

/// Apply a finished network call to the state. Pending flags are cleared on
/// both arms; stale generations are dropped.
pub fn handle_api(event: ApiEvent, state: &mut AppState) {
    match event {
        ApiEvent::Preview { generation, result } => {
            if generation != state.preview_generation {
                return;
            }
            state.preview_loading = false;
            // A failed preview is just "no preview", never an error
            state.preview = result.ok();
        }
        ApiEvent::Generated { result } => {
            state.generating = false;
            match result {
                Ok(quiz) => {
                    state.generated = Some(QuizTake::new(quiz));
                    state.focus = GenerateFocus::Quiz;
                }
                Err(message) => {
                    state.input_error = Some(message);
                }
            }
        }
        ApiEvent::History { generation, result } => {
            if generation != state.history_generation {
                return;
            }
            state.history_loading = false;
            state.history_loaded_once = true;
            match result {
                Ok(rows) => {
                    // Replace, never append
                    state.history_rows = rows;
                    if state.history_cursor >= state.history_rows.len() {
                        state.history_cursor = state.history_rows.len().saturating_sub(1);
                    }
                    state.history_error = None;
                }
                Err(message) => {
                    // Previous rows stay on screen
                    state.history_error = Some(message);
                }
            }
        }
        ApiEvent::Detail { generation, result } => {
            if generation != state.detail_generation {
                return;
            }
            match result {
                Ok(quiz) => {
                    if matches!(state.overlay, Some(Overlay::Loading { .. })) {
                        state.overlay = Some(Overlay::Detail(QuizTake::new(quiz)));
                    }
                }
                Err(message) => {
                    state.overlay = None;
                    state.push_dialog(Dialog::Error(message));
                }
            }
        }
    }
}

fn handle_mouse(
    mouse: MouseEvent,
    state: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::Sender<ApiEvent>,
    area: Rect,
) {
    // Dialogs are keyboard-only
    if state.has_dialog() {
        return;
    }

    let x = mouse.column;
    let y = mouse.row;

    if state.overlay.is_some() {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let rect = ui::overlay::overlay_rect(area);
                if !contains(rect, x, y) {
                    // Clicking outside the modal dismisses it
                    state.close_overlay();
                    return;
                }
                let content = ui::overlay::content_rect(area);
                if let Some(Overlay::Detail(take)) = state.overlay.as_mut() {
                    click_take(take, content, x, y);
                }
            }
            MouseEventKind::ScrollUp => {
                if let Some(Overlay::Detail(take)) = state.overlay.as_mut() {
                    take.cursor = take.cursor.saturating_sub(1);
                }
            }
            MouseEventKind::ScrollDown => {
                if let Some(Overlay::Detail(take)) = state.overlay.as_mut() {
                    let total = take.quiz.questions.len();
                    if take.cursor + 1 < total {
                        take.cursor += 1;
                    }
                }
            }
            _ => {}
        }
        return;
    }

    let layout = ui::layout::compute_layout(area);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if y == layout.titlebar.y {
                if let Some(tab) = ui::titlebar::tab_at(x) {
                    if tab != state.tab {
                        switch_tab(state, client, tx);
                    }
                }
                return;
            }

            match state.tab {
                Tab::Generate => {
                    let (card, _) = ui::generate::split_main(layout.main);
                    if contains(card, x, y) {
                        state.focus = GenerateFocus::UrlInput;
                        return;
                    }
                    let quiz_rect = ui::generate::quiz_rect(layout.main);
                    if state.generated.is_some() && contains(quiz_rect, x, y) {
                        state.focus = GenerateFocus::Quiz;
                        if let Some(take) = state.generated.as_mut() {
                            click_take(take, quiz_rect, x, y);
                        }
                    }
                }
                Tab::History => {
                    if ui::history::reload_hit(layout.main, x, y) {
                        start_history_fetch(state, client, tx);
                        return;
                    }
                    if let Some(row) = ui::history::row_at(layout.main, state, y) {
                        state.history_cursor = row;
                        open_detail(state, client, tx);
                    }
                }
            }
        }
        MouseEventKind::ScrollUp => match state.tab {
            Tab::Generate => {
                if let Some(take) = state.generated.as_mut() {
                    take.cursor = take.cursor.saturating_sub(1);
                }
            }
            Tab::History => {
                state.history_cursor = state.history_cursor.saturating_sub(1);
            }
        },
        MouseEventKind::ScrollDown => match state.tab {
            Tab::Generate => {
                if let Some(take) = state.generated.as_mut() {
                    let total = take.quiz.questions.len();
                    if take.cursor + 1 < total {
                        take.cursor += 1;
                    }
                }
            }
            Tab::History => {
                if state.history_cursor + 1 < state.history_rows.len() {
                    state.history_cursor += 1;
                }
            }
        },
        _ => {}
    }
}

/// Map a click inside a quiz region to an option / submit / retake. Rebuilds
/// the same lines the draw used, so hit testing matches the layout.
fn click_take(take: &mut QuizTake, content: Rect, x: u16, y: u16) {
    if !contains(content, x, y) {
        return;
    }
    let built = ui::quiz::build_quiz_lines(take, content.width, true);
    let scroll = ui::quiz::scroll_offset(&built, take, content.height as usize);
    let line = (y - content.y) as usize + scroll;

    if built.submit_row == Some(line) {
        take.session.submit();
        return;
    }
    if built.retake_row == Some(line) {
        take.session.retake();
        return;
    }
    if let Some(hit) = built.option_rows.iter().find(|row| row.contains(line)) {
        let question = hit.question;
        let option = take.quiz.questions[question].options[hit.option].clone();
        take.cursor = question;
        take.session.select_option(question, &option);
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
