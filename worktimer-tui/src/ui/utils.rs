use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A `width` x `height` box in the middle of `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
