//! Playground application state and key handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

use masked_input::config::PlaygroundConfig;
use masked_input::mask::MaskMode;
use masked_input::state::{FormHandle, FormRegistry, MaskedInput};

/// Main application struct
pub struct App {
    /// Form title
    pub title: String,
    /// Controller shared by every field
    pub form: Rc<RefCell<FormRegistry>>,
    /// Mounted fields in display order
    pub fields: Vec<MaskedInput>,
    /// Index of the focused field
    pub active: usize,
    /// Result of the last submit
    pub status_message: Option<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Mount every configured field and focus the first one
    pub fn new(config: PlaygroundConfig) -> Result<Self> {
        let form = FormRegistry::shared();
        let handle: FormHandle = form.clone();

        let mut fields = Vec::with_capacity(config.fields.len());
        for props in config.fields {
            fields.push(MaskedInput::mount(props, Rc::clone(&handle))?);
        }
        if let Some(first) = fields.first_mut() {
            first.on_focus();
        }

        Ok(Self {
            title: config.title,
            form,
            fields,
            active: 0,
            status_message: None,
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn active_field(&self) -> Option<&MaskedInput> {
        self.fields.get(self.active)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab => self.move_focus(1),
            KeyCode::BackTab => self.move_focus(self.fields.len().saturating_sub(1)),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_char(c)
            }
            _ => {}
        }
        Ok(())
    }

    /// Blur the current field and focus the one `step` positions ahead (wrapping)
    fn move_focus(&mut self, step: usize) {
        if self.fields.is_empty() {
            return;
        }
        self.fields[self.active].on_blur();
        self.active = (self.active + step) % self.fields.len();
        self.fields[self.active].on_focus();
    }

    fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.active) {
            let raw = format!("{}{c}", field.value());
            field.on_change(&raw);
        }
    }

    /// Masked values lose their last typed character, not a trailing literal
    fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.active) {
            let mut raw = field.value().to_string();
            let unmasked =
                field.mask().mode == MaskMode::PlainPattern && field.mask().pattern.is_empty();
            if unmasked {
                raw.pop();
            } else if let Some((index, _)) = raw
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_ascii_alphanumeric())
            {
                raw.remove(index);
            }
            field.on_change(&raw);
        }
    }

    fn submit(&mut self) {
        let result = self.form.borrow_mut().submit();
        for field in &mut self.fields {
            field.refresh();
        }

        self.status_message = Some(match result {
            Ok(values) => {
                info!(fields = values.len(), "form submitted");
                let summary: Vec<String> = values
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect();
                format!("Submitted: {}", summary.join(", "))
            }
            Err(errors) => errors.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masked_input::state::{FieldPhase, InputProps};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn app_with(fields: Vec<InputProps>) -> App {
        App::new(PlaygroundConfig {
            title: "Test".to_string(),
            fields,
        })
        .unwrap()
    }

    #[test]
    fn test_new_mounts_and_focuses_first_field() {
        let app = App::new(PlaygroundConfig::default()).unwrap();
        assert_eq!(app.form.borrow().len(), 4);
        assert_eq!(app.fields[0].phase(), FieldPhase::Focused);
        assert_eq!(app.fields[3].value(), "R$ 100,00");
    }

    #[test]
    fn test_duplicate_config_names_fail() {
        let result = App::new(PlaygroundConfig {
            title: String::new(),
            fields: vec![InputProps::text("a", "A"), InputProps::text("a", "B")],
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_typing_goes_through_mask() {
        let mut app = app_with(vec![InputProps::text("phone", "Phone").with_format("(99) 99999-9999")]);
        type_text(&mut app, "11987654321");
        assert_eq!(app.fields[0].value(), "(11) 98765-4321");
        type_text(&mut app, "9x");
        assert_eq!(app.fields[0].value(), "(11) 98765-4321");
    }

    #[test]
    fn test_backspace_removes_last_typed_char() {
        let mut app = app_with(vec![
            InputProps::text("code", "Code").with_format("999-999"),
            InputProps::money("amount", "Amount").with_value(12.34),
            InputProps::text("free", "Free"),
        ]);
        type_text(&mut app, "1234");
        assert_eq!(app.fields[0].value(), "123-4");
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.fields[0].value(), "123");

        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.fields[1].value(), "R$ 1,23");

        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "ab ");
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.fields[2].value(), "ab");
    }

    #[test]
    fn test_tab_blurs_and_wraps() {
        let mut app = app_with(vec![InputProps::text("a", "A"), InputProps::text("b", "B")]);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active, 1);
        assert_eq!(app.fields[0].phase(), FieldPhase::Blurred);
        assert_eq!(app.fields[1].phase(), FieldPhase::Focused);

        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active, 0);
        app.handle_key(key(KeyCode::BackTab)).unwrap();
        assert_eq!(app.active, 1);
    }

    #[test]
    fn test_blurred_field_shows_first_error() {
        let mut app = app_with(vec![
            InputProps::text("name", "Name").required(),
            InputProps::text("other", "Other"),
        ]);
        assert_eq!(app.fields[0].visible_error(), None);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.fields[0].visible_error(), Some("This field is required"));
    }

    #[test]
    fn test_submit_reports_failures_then_success() {
        let mut app = app_with(vec![
            InputProps::text("name", "Name").required(),
            InputProps::text("other", "Other").required(),
        ]);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            app.status_message.as_deref(),
            Some("2 field(s) failed validation")
        );
        assert!(app.fields[1].errors_visible());

        type_text(&mut app, "Ana");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "x");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Submitted: name=Ana, other=x")
        );
    }

    #[test]
    fn test_esc_quits_and_ctrl_chars_are_ignored() {
        let mut app = app_with(vec![InputProps::text("a", "A")]);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.fields[0].value(), "");
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_dropping_app_empties_registry() {
        let app = app_with(vec![InputProps::text("a", "A")]);
        let form = Rc::clone(&app.form);
        drop(app);
        assert!(form.borrow().is_empty());
    }
}
