use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

mod day_view;
mod error_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &App) {
    if let Some(message) = &app.init_error {
        error_view::render_error_panel(frame, message);
        return;
    }

    match &app.model {
        Some(model) => day_view::render_day_view(frame, app, model),
        None => render_loading(frame),
    }
}

fn render_loading(frame: &mut Frame) {
    let loading = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(loading, utils::centered_rect(20, 1, frame.area()));
}
