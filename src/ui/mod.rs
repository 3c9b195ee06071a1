//! UI module for rendering the playground form

mod field_renderer;

use crate::app::App;
use field_renderer::{draw_input, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    draw_form(frame, chunks[0], app);
    draw_status_bar(frame, chunks[1], app);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", app.title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = app
        .fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in app.fields.iter().zip(rows.iter()) {
        draw_input(frame, *row, &field.view());
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Tab/Shift+Tab: move  Enter: submit  Esc: quit",
        Style::default().fg(Color::DarkGray),
    )];

    if let Some(msg) = &app.status_message {
        let color = if msg.starts_with("Submitted") {
            Color::Green
        } else {
            Color::Red
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
