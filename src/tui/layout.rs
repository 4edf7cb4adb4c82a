use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions for the search UI
pub struct AppLayout {
    pub tabs_area: Rect,
    pub input_area: Rect,
    pub result_area: Rect,
    pub history_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Tabs: top row
    /// - Input box: 3 rows
    /// - Result (60% width, left) and history (40% width, right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[2]);

        Self {
            tabs_area: vertical_chunks[0],
            input_area: vertical_chunks[1],
            result_area: horizontal_chunks[0],
            history_area: horizontal_chunks[1],
            status_area: vertical_chunks[3],
        }
    }
}
