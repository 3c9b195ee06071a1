//! Field rendering for masked inputs

use masked_input::state::InputView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows one field occupies: the bordered box plus its error line
pub const FIELD_HEIGHT: u16 = 4;

fn border_color(view: &InputView) -> Color {
    if view.has_danger {
        Color::Red
    } else if view.is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}

fn title(view: &InputView) -> Span<'static> {
    let mut text = format!(" {} ", view.label);
    if view.is_read_only {
        text.push_str("(read-only) ");
    }
    let style = if view.label_floating {
        Style::default()
            .fg(border_color(view))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(text, style)
}

/// Draw one input from its view model
pub fn draw_input(frame: &mut Frame, area: Rect, view: &InputView) {
    let box_area = Rect {
        height: area.height.min(3),
        ..area
    };

    let value_style = if view.is_disable {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = if view.value.is_empty() && !view.is_focused {
        let hint = if view.placeholder.is_empty() {
            "(empty)"
        } else {
            view.placeholder.as_str()
        };
        vec![Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::styled(view.value.clone(), value_style)]
    };

    if view.is_focused {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(title(view))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(view)));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), box_area);

    if let Some(error) = &view.error {
        if area.height > 3 {
            let error_area = Rect {
                y: area.y + 3,
                height: 1,
                ..area
            };
            let line = Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(Paragraph::new(line), error_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn view() -> InputView {
        InputView {
            name: "amount".to_string(),
            id: "amount".to_string(),
            label: "Amount".to_string(),
            placeholder: String::new(),
            value: "R$ 12,34".to_string(),
            is_disable: false,
            is_read_only: false,
            is_focused: false,
            label_floating: true,
            errors_visible: false,
            error: None,
            has_danger: false,
        }
    }

    fn render(view: &InputView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, FIELD_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_input(frame, area, view);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draws_label_and_value() {
        let out = render(&view());
        assert!(out.contains("Amount"));
        assert!(out.contains("R$ 12,34"));
    }

    #[test]
    fn test_draws_error_line() {
        let mut v = view();
        v.error = Some("Too low".to_string());
        v.has_danger = true;
        v.errors_visible = true;
        assert!(render(&v).contains("Too low"));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut v = view();
        v.value = String::new();
        v.placeholder = "R$ 0,00".to_string();
        assert!(render(&v).contains("R$ 0,00"));
    }

    #[test]
    fn test_read_only_marker() {
        let mut v = view();
        v.is_read_only = true;
        assert!(render(&v).contains("(read-only)"));
    }
}
