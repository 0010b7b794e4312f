use super::*;
use crate::app::EditTarget;
use worktimer::{DisplayModel, EntryView, Field};

const TIME_WIDTH: usize = 5;

pub fn render_day_view(frame: &mut Frame, app: &App, model: &DisplayModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Date
            Constraint::Length(3), // Current timer
            Constraint::Min(3),    // Entries
            Constraint::Length(3), // Status
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_date(frame, chunks[0], app, model);
    render_timer(frame, chunks[1], app, model);
    render_entries(frame, chunks[2], app, model);
    render_status(frame, chunks[3], app);
    render_controls(frame, chunks[4], app);
}

fn render_date(frame: &mut Frame, area: Rect, app: &App, model: &DisplayModel) {
    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::Yellow)),
        field_span(app, EditTarget::Date, &model.date_key, 10),
        Span::styled(" ▶", Style::default().fg(Color::Yellow)),
    ]);

    let date = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Work Timer ")
            .title_bottom(Line::from(format!(" {} ", app.storage_name)).right_aligned())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(date, area);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App, model: &DisplayModel) {
    let timer_color = if model.running {
        Color::Green
    } else {
        Color::DarkGray
    };
    let total = model.current_total.as_deref().unwrap_or("");

    let line = Line::from(vec![
        Span::styled(
            if model.running { "● " } else { "○ " },
            Style::default().fg(timer_color),
        ),
        field_span(
            app,
            EditTarget::Field {
                index: None,
                field: Field::CurrentTimer,
            },
            model.current_timer.as_deref().unwrap_or(""),
            TIME_WIDTH,
        ),
        Span::raw("  "),
        Span::styled(
            format!("{total:>TIME_WIDTH$}"),
            Style::default()
                .fg(timer_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        field_span(
            app,
            EditTarget::Field {
                index: None,
                field: Field::CurrentDesc,
            },
            &model.current_desc,
            0,
        ),
    ]);

    let title = if model.running {
        " Timer (running) "
    } else {
        " Timer "
    };
    let timer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(timer_color))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(timer, area);
}

fn render_entries(frame: &mut Frame, area: Rect, app: &App, model: &DisplayModel) {
    let mut lines: Vec<Line> = model
        .entries
        .iter()
        .map(|entry| entry_line(app, entry))
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No entries for this day",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let entries = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Entries ")
            .title_bottom(
                Line::from(Span::styled(
                    format!(" Total {} ", model.combined_total),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            )
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(entries, area);
}

fn entry_line<'a>(app: &'a App, entry: &'a EntryView) -> Line<'a> {
    let target = |field| EditTarget::Field {
        index: Some(entry.index),
        field,
    };
    let total = entry.total.as_deref().unwrap_or("");

    Line::from(vec![
        field_span(
            app,
            target(Field::Begin),
            entry.begin.as_deref().unwrap_or(""),
            TIME_WIDTH,
        ),
        Span::styled(" - ", Style::default().fg(Color::DarkGray)),
        field_span(
            app,
            target(Field::End),
            entry.end.as_deref().unwrap_or(""),
            TIME_WIDTH,
        ),
        Span::raw("  "),
        Span::styled(
            format!("{total:>TIME_WIDTH$}"),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        field_span(app, target(Field::Desc), &entry.desc, 0),
    ])
}

/// One editable field: highlighted when focused, with a cursor while edited.
fn field_span<'a>(app: &'a App, target: EditTarget, text: &'a str, width: usize) -> Span<'a> {
    let focused = app.focused_target() == target;

    if let Some(edit) = app.edit.as_ref().filter(|edit| edit.target == target) {
        let (before, after) = edit.input.split_at_cursor();
        return Span::styled(
            format!("{before}█{after}"),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
    }

    let shown = if text.is_empty() && width == TIME_WIDTH {
        "--:--".to_string()
    } else if text.is_empty() && focused {
        "…".to_string()
    } else {
        format!("{text:<width$}")
    };

    let style = if focused {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if text.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    Span::styled(shown, style)
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let contextual_status = app.contextual_status();
    let status_text = app.status_message.as_deref().unwrap_or(&contextual_status);

    let status_lower = status_text.to_lowercase();
    let is_error = status_lower.contains("error")
        || status_lower.contains("invalid")
        || status_lower.contains("failed")
        || status_lower.contains("already")
        || status_lower.contains("no timer");

    let is_success = status_lower.contains("saved")
        || status_lower.contains("started")
        || status_lower.contains("stopped")
        || status_lower.contains("deleted")
        || status_lower.contains("exported")
        || status_lower.contains("opened");

    let (border_style, text_color) = if is_error {
        (Style::default().fg(Color::Red), Color::Red)
    } else if is_success {
        (Style::default().fg(Color::Green), Color::Green)
    } else {
        (Style::default().fg(Color::White), Color::White)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(text_color))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(border_style)
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let spans = if app.is_editing() {
        vec![
            key("Enter/Tab"),
            Span::raw(": Save  "),
            key("Esc"),
            Span::raw(": Cancel  "),
            key("←/→"),
            Span::raw(": Move cursor"),
        ]
    } else {
        vec![
            key("Space"),
            Span::raw(if app.is_timer_running() {
                ": Stop  "
            } else {
                ": Start  "
            }),
            key("Enter"),
            Span::raw(": Edit  "),
            key("d"),
            Span::raw(": Delete  "),
            key("←/→"),
            Span::raw(": Day  "),
            key("g"),
            Span::raw(": Today  "),
            key("e"),
            Span::raw(": Export  "),
            key("o"),
            Span::raw(": Popout  "),
            key("q"),
            Span::raw(": Quit"),
        ]
    };

    let controls = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Controls ")
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(controls, area);
}
