pub mod dialog;
pub mod generate;
pub mod history;
pub mod keybar;
pub mod layout;
pub mod overlay;
pub mod quiz;
pub mod titlebar;

use ratatui::Frame;

use crate::state::{AppState, Tab};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    match state.tab {
        Tab::Generate => generate::draw_generate(f, layout.main, state),
        Tab::History => history::draw_history(f, layout.main, state),
    }
    keybar::draw_keybar(f, layout.keybar, state);

    // Overlay above the tab content, dialogs above everything.
    if state.overlay.is_some() {
        overlay::draw_overlay(f, area, state);
    }
    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}
