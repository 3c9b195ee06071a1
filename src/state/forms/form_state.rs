//! Form controller protocol and the in-memory registry implementing it

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use super::rules::{evaluate, Rule};
use crate::error::{FieldError, Result};

/// Called with the field's errors after a failing validation
pub type ErrorCallback = Box<dyn FnMut(&[String])>;
/// Called with the field's value after a passing validation
pub type SuccessCallback = Box<dyn FnMut(&str)>;

/// What a field hands to its form when it mounts
pub struct FieldRegistration {
    pub name: String,
    pub required: bool,
    pub rules: Vec<Rule>,
    pub on_error: Option<ErrorCallback>,
    pub on_success: Option<SuccessCallback>,
}

impl FieldRegistration {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            rules: Vec::new(),
            on_error: None,
            on_success: None,
        }
    }

    /// Rules in evaluation order, with `required` as a leading rule when not listed
    pub fn effective_rules(&self) -> Vec<Rule> {
        let mut rules = Vec::with_capacity(self.rules.len() + 1);
        if self.required && !self.rules.iter().any(Rule::is_required) {
            rules.push(Rule::required());
        }
        rules.extend(self.rules.iter().cloned());
        rules
    }
}

impl fmt::Debug for FieldRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistration")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("rules", &self.rules)
            .field("on_error", &self.on_error.is_some())
            .field("on_success", &self.on_success.is_some())
            .finish()
    }
}

/// The form side of field registration.
///
/// Fields hold a [`FormHandle`] and call into it synchronously. Callbacks
/// stored in a registration run while the form is borrowed, so they must not
/// call back into the form.
///
/// A field dropped while the form is borrowed cannot deregister itself: its
/// entry stays and a remount with that name fails with
/// [`FieldError::DuplicateName`] until the owner calls
/// [`FormController::deregister`] for it. Drop fields outside any borrow.
#[cfg_attr(test, mockall::automock)]
pub trait FormController {
    /// Store a field descriptor. Names are unique among live fields.
    fn register(&mut self, registration: FieldRegistration) -> Result<()>;

    /// Forget a field. Unknown names are ignored.
    fn deregister(&mut self, name: &str);

    /// Record a new value and return the field's validation errors
    fn report_value(&mut self, name: &str, value: &str) -> Vec<String>;

    /// Latest validation errors for a field
    fn errors_for(&self, name: &str) -> Vec<String>;

    /// Whether the form forces every field to show its errors
    fn show_errors(&self) -> bool;
}

/// Shared handle fields use to reach their form
pub type FormHandle = Rc<RefCell<dyn FormController>>;

/// Per-field validation failures returned by a rejected submit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct FormErrors {
    /// (name, errors) in registration order
    pub fields: Vec<(String, Vec<String>)>,
}

impl FormErrors {
    pub fn for_field(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, errors)| errors.as_slice())
    }
}

struct Entry {
    registration: FieldRegistration,
    rules: Vec<Rule>,
    value: String,
    errors: Vec<String>,
}

/// In-memory form controller keeping fields in registration order
#[derive(Default)]
pub struct FormRegistry {
    entries: Vec<Entry>,
    show_errors: bool,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in a shared handle; clone it into a [`FormHandle`] for fields
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|entry| entry.registration.name.as_str())
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.position(name)
            .map(|index| self.entries[index].value.as_str())
    }

    /// Re-run the rules for one field against its stored value
    pub fn validate(&mut self, name: &str) -> Vec<String> {
        match self.position(name) {
            Some(index) => Self::run_rules(&mut self.entries[index]),
            None => Vec::new(),
        }
    }

    /// Validate every field and force errors visible.
    ///
    /// Returns the values in registration order when everything passes.
    pub fn submit(&mut self) -> std::result::Result<Vec<(String, String)>, FormErrors> {
        self.show_errors = true;

        let mut failed = Vec::new();
        for entry in &mut self.entries {
            let errors = Self::run_rules(entry);
            if !errors.is_empty() {
                failed.push((entry.registration.name.clone(), errors));
            }
        }

        if failed.is_empty() {
            debug!(fields = self.entries.len(), "form submitted");
            Ok(self
                .entries
                .iter()
                .map(|entry| (entry.registration.name.clone(), entry.value.clone()))
                .collect())
        } else {
            debug!(failed = failed.len(), "form submit rejected");
            Err(FormErrors { fields: failed })
        }
    }

    /// Stop forcing errors visible (fields that were blurred keep showing theirs)
    pub fn reset_show_errors(&mut self) {
        self.show_errors = false;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.registration.name == name)
    }

    fn run_rules(entry: &mut Entry) -> Vec<String> {
        entry.errors = evaluate(&entry.rules, &entry.value);

        if entry.errors.is_empty() {
            if let Some(on_success) = entry.registration.on_success.as_mut() {
                on_success(&entry.value);
            }
        } else if let Some(on_error) = entry.registration.on_error.as_mut() {
            on_error(&entry.errors);
        }

        entry.errors.clone()
    }
}

impl FormController for FormRegistry {
    fn register(&mut self, registration: FieldRegistration) -> Result<()> {
        if registration.name.is_empty() {
            warn!("rejected field registration without a name");
            return Err(FieldError::MissingName);
        }
        if self.contains(&registration.name) {
            warn!(name = %registration.name, "rejected duplicate field registration");
            return Err(FieldError::DuplicateName {
                name: registration.name,
            });
        }

        debug!(name = %registration.name, rules = registration.rules.len(), "field registered");
        let rules = registration.effective_rules();
        self.entries.push(Entry {
            registration,
            rules,
            value: String::new(),
            errors: Vec::new(),
        });
        Ok(())
    }

    fn deregister(&mut self, name: &str) {
        if let Some(index) = self.position(name) {
            self.entries.remove(index);
            debug!(name, "field deregistered");
        }
    }

    fn report_value(&mut self, name: &str, value: &str) -> Vec<String> {
        let Some(index) = self.position(name) else {
            warn!(name, "value reported for unregistered field");
            return Vec::new();
        };
        let entry = &mut self.entries[index];
        entry.value = value.to_string();
        Self::run_rules(entry)
    }

    fn errors_for(&self, name: &str) -> Vec<String> {
        self.position(name)
            .map(|index| self.entries[index].errors.clone())
            .unwrap_or_default()
    }

    fn show_errors(&self) -> bool {
        self.show_errors
    }
}
