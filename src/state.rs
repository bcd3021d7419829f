use crate::model::{HistoryEntry, Preview, Quiz};
use crate::session::TakeSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Generate,
    History,
}

/// Keyboard focus within the generate tab: the URL field, or the quiz below
/// it once one has been generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateFocus {
    UrlInput,
    Quiz,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Error(String),
    Help,
}

/// One displayed quiz: the wire object, its answer state, and the question
/// the keyboard cursor is on. Dropped wholesale when the view goes away.
#[derive(Debug, Clone)]
pub struct QuizTake {
    pub quiz: Quiz,
    pub session: TakeSession,
    pub cursor: usize,
}

impl QuizTake {
    pub fn new(quiz: Quiz) -> Self {
        let session = TakeSession::for_quiz(&quiz);
        Self {
            quiz,
            session,
            cursor: 0,
        }
    }
}

/// The history detail overlay: a loading indicator until the fetch lands,
/// then a fresh take of the fetched quiz.
#[derive(Debug)]
pub enum Overlay {
    Loading { id: i64 },
    Detail(QuizTake),
}

pub struct AppState {
    pub tab: Tab,

    // Generate tab
    pub url_input: String,
    pub url_cursor: usize,
    pub focus: GenerateFocus,
    pub input_error: Option<String>,
    pub preview: Option<Preview>,
    pub preview_loading: bool,
    pub preview_generation: u64,
    pub generating: bool,
    pub generated: Option<QuizTake>,

    // History tab
    pub history_rows: Vec<HistoryEntry>,
    pub history_loading: bool,
    pub history_loaded_once: bool,
    pub history_error: Option<String>,
    pub history_generation: u64,
    pub history_cursor: usize,
    pub overlay: Option<Overlay>,
    pub detail_generation: u64,

    pub dialogs: Vec<Dialog>,
    pub tick: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(prefill_url: Option<String>) -> Self {
        let url_input = prefill_url.unwrap_or_default();
        let url_cursor = url_input.len();
        Self {
            tab: Tab::Generate,
            url_input,
            url_cursor,
            focus: GenerateFocus::UrlInput,
            input_error: None,
            preview: None,
            preview_loading: false,
            preview_generation: 0,
            generating: false,
            generated: None,
            history_rows: Vec::new(),
            history_loading: false,
            history_loaded_once: false,
            history_error: None,
            history_generation: 0,
            history_cursor: 0,
            overlay: None,
            detail_generation: 0,
            dialogs: Vec::new(),
            tick: 0,
            should_quit: false,
        }
    }

    /// The quiz currently receiving interaction keys: the overlay detail
    /// when open, else the generated quiz on the generate tab.
    pub fn active_take_mut(&mut self) -> Option<&mut QuizTake> {
        if let Some(Overlay::Detail(take)) = self.overlay.as_mut() {
            return Some(take);
        }
        if self.tab == Tab::Generate {
            return self.generated.as_mut();
        }
        None
    }

    /// Close the overlay, discarding the loaded quiz and any in-progress
    /// answers. Bumping the generation orphans an in-flight detail fetch.
    pub fn close_overlay(&mut self) {
        self.overlay = None;
        self.detail_generation = self.detail_generation.wrapping_add(1);
    }

    pub fn next_preview_generation(&mut self) -> u64 {
        self.preview_generation = self.preview_generation.wrapping_add(1);
        self.preview_generation
    }

    pub fn next_history_generation(&mut self) -> u64 {
        self.history_generation = self.history_generation.wrapping_add(1);
        self.history_generation
    }

    pub fn next_detail_generation(&mut self) -> u64 {
        self.detail_generation = self.detail_generation.wrapping_add(1);
        self.detail_generation
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialogs.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialogs.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialogs.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialogs.pop()
    }
}
