//! Masked input field: value objects, configuration and the mounted field

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::form_state::{ErrorCallback, FieldRegistration, FormHandle, SuccessCallback};
use super::rules::Rule;
use crate::error::{FieldError, Result};
use crate::mask::{self, CurrencyOptions, MaskConfig};
use crate::state::field_state::{FieldEvent, FieldPhase, FieldUiState};

/// Initial field value as the integrator passes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl FieldValue {
    /// Canonical string form; numbers get exactly two fractional digits
    pub fn canonical(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => fixed_two(*n),
        }
    }

    /// Canonicalize, then mask
    pub fn to_display(&self, config: &MaskConfig) -> String {
        mask::format(&self.canonical(), config)
    }
}

/// Two fractional digits, halves rounded away from zero
fn fixed_two(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let cents = format!("{:.0}", (value.abs() * 100.0).round());
    let cents = format!("{cents:0>3}");
    let (integer, fraction) = cents.split_at(cents.len() - 2);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{integer}.{fraction}")
}

/// Options recognized by a masked input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputProps {
    pub name: String,
    pub value: FieldValue,
    /// Pattern mask; empty disables it
    pub format: String,
    pub is_money: bool,
    pub currency: CurrencyOptions,
    pub required: bool,
    pub rules: Vec<Rule>,
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub is_disable: bool,
    pub is_read_only: bool,
}

impl InputProps {
    /// Plain text input
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            id: name.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }

    /// Money input with the default currency marks
    pub fn money(name: &str, label: &str) -> Self {
        Self {
            is_money: true,
            ..Self::text(name, label)
        }
    }

    pub fn with_format(mut self, pattern: &str) -> Self {
        self.format = pattern.to_string();
        self
    }

    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn mask_config(&self) -> MaskConfig {
        MaskConfig::from_options(&self.format, self.is_money, &self.currency)
    }
}

/// Optional validation callbacks forwarded to the form
#[derive(Default)]
pub struct FieldCallbacks {
    pub on_error: Option<ErrorCallback>,
    pub on_success: Option<SuccessCallback>,
}

/// Everything a renderer needs to draw one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub name: String,
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub is_disable: bool,
    pub is_read_only: bool,
    pub is_focused: bool,
    /// Label sits above the input when focused or filled
    pub label_floating: bool,
    pub errors_visible: bool,
    /// First error, only when errors are visible
    pub error: Option<String>,
    /// Danger styling on the input box
    pub has_danger: bool,
}

/// A mounted masked input.
///
/// Registers itself with its form on [`MaskedInput::mount`] and deregisters
/// when dropped.
pub struct MaskedInput {
    props: InputProps,
    mask: MaskConfig,
    value: String,
    errors: Vec<String>,
    ui: FieldUiState,
    form: FormHandle,
}

impl MaskedInput {
    /// Mount without validation callbacks
    pub fn mount(props: InputProps, form: FormHandle) -> Result<Self> {
        Self::mount_with_callbacks(props, FieldCallbacks::default(), form)
    }

    /// Validate the mask, format the initial value and register with `form`
    pub fn mount_with_callbacks(
        props: InputProps,
        callbacks: FieldCallbacks,
        form: FormHandle,
    ) -> Result<Self> {
        if props.name.is_empty() {
            return Err(FieldError::MissingName);
        }

        let mask = props.mask_config();
        mask.validate()?;
        let value = props.value.to_display(&mask);

        let registration = FieldRegistration {
            name: props.name.clone(),
            required: props.required,
            rules: props.rules.clone(),
            on_error: callbacks.on_error,
            on_success: callbacks.on_success,
        };

        let (errors, show_errors) = {
            let mut controller = form.borrow_mut();
            controller.register(registration)?;
            let errors = controller.report_value(&props.name, &value);
            (errors, controller.show_errors())
        };

        debug!(name = %props.name, value = %value, "field mounted");

        Ok(Self {
            props,
            mask,
            value,
            errors,
            ui: FieldUiState::new(show_errors),
            form,
        })
    }

    pub fn name(&self) -> &str {
        &self.props.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn ui_state(&self) -> FieldUiState {
        self.ui
    }

    pub fn phase(&self) -> FieldPhase {
        self.ui.phase()
    }

    pub fn mask(&self) -> &MaskConfig {
        &self.mask
    }

    pub fn is_editable(&self) -> bool {
        !self.props.is_disable && !self.props.is_read_only
    }

    pub fn on_focus(&mut self) {
        self.ui.apply(FieldEvent::Focus);
    }

    pub fn on_blur(&mut self) {
        self.ui.apply(FieldEvent::Blur);
    }

    /// Format the raw text from the renderer, report it and return the new display value.
    ///
    /// Disabled and read-only fields keep their value.
    pub fn on_change(&mut self, raw: &str) -> String {
        if !self.is_editable() {
            debug!(name = %self.props.name, "ignored change on locked field");
            return self.value.clone();
        }

        self.value = mask::format(raw, &self.mask);
        self.ui.apply(FieldEvent::Change);
        self.errors = self
            .form
            .borrow_mut()
            .report_value(&self.props.name, &self.value);
        self.value.clone()
    }

    /// Validation result pushed by the form
    pub fn receive_validation(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }

    /// Pull errors and the forced show-errors flag from the form
    pub fn refresh(&mut self) {
        let (errors, show_errors) = {
            let form = self.form.borrow();
            (form.errors_for(&self.props.name), form.show_errors())
        };
        self.receive_validation(errors);
        self.ui.apply(FieldEvent::ForceShowErrors(show_errors));
    }

    pub fn errors_visible(&self) -> bool {
        self.ui.errors_visible()
    }

    /// The single error slot: first error, only when visible
    pub fn visible_error(&self) -> Option<&str> {
        if self.errors_visible() {
            self.errors.first().map(String::as_str)
        } else {
            None
        }
    }

    pub fn view(&self) -> InputView {
        let error = self.visible_error().map(str::to_string);
        InputView {
            name: self.props.name.clone(),
            id: self.props.id.clone(),
            label: self.props.label.clone(),
            placeholder: self.props.placeholder.clone(),
            value: self.value.clone(),
            is_disable: self.props.is_disable,
            is_read_only: self.props.is_read_only,
            is_focused: self.ui.is_focused,
            label_floating: self.ui.is_focused || !self.value.is_empty(),
            errors_visible: self.errors_visible(),
            has_danger: error.is_some(),
            error,
        }
    }
}

impl Drop for MaskedInput {
    fn drop(&mut self) {
        match self.form.try_borrow_mut() {
            Ok(mut form) => form.deregister(&self.props.name),
            Err(_) => warn!(name = %self.props.name, "form busy, field not deregistered"),
        }
    }
}
