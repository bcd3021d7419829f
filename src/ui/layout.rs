use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub titlebar: Rect,
    pub main: Rect,
    pub keybar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titlebar with tabs
            Constraint::Min(5),    // active tab content
            Constraint::Length(1), // keybar
        ])
        .split(area);

    AppLayout {
        titlebar: vertical[0],
        main: vertical[1],
        keybar: vertical[2],
    }
}
