//! Focus, blur and error visibility for a single field

/// Where a field is in its focus lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// Never focused or blurred
    Pristine,
    Focused,
    /// Left at least once and not focused now
    Blurred,
}

/// Events that drive the field state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Focus,
    Blur,
    /// Value edited; the state itself does not move
    Change,
    /// The form forces error visibility on or off (e.g. after a submit attempt)
    ForceShowErrors(bool),
}

/// UI state of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldUiState {
    /// Drives the floating label
    pub is_focused: bool,
    /// Once set it stays set for the field's lifetime
    pub has_been_blurred: bool,
    pub errors_force_visible: bool,
}

impl FieldUiState {
    /// Initial state, honoring the form's show-errors flag
    pub fn new(form_shows_errors: bool) -> Self {
        Self {
            errors_force_visible: form_shows_errors,
            ..Default::default()
        }
    }

    pub fn errors_visible(&self) -> bool {
        self.has_been_blurred || self.errors_force_visible
    }

    pub fn phase(&self) -> FieldPhase {
        if self.is_focused {
            FieldPhase::Focused
        } else if self.has_been_blurred {
            FieldPhase::Blurred
        } else {
            FieldPhase::Pristine
        }
    }

    /// Apply an event in place
    pub fn apply(&mut self, event: FieldEvent) {
        *self = reduce(*self, event);
    }
}

/// Pure transition function
pub fn reduce(state: FieldUiState, event: FieldEvent) -> FieldUiState {
    match event {
        FieldEvent::Focus => FieldUiState {
            is_focused: true,
            ..state
        },
        FieldEvent::Blur => FieldUiState {
            is_focused: false,
            has_been_blurred: true,
            ..state
        },
        FieldEvent::Change => state,
        FieldEvent::ForceShowErrors(visible) => FieldUiState {
            errors_force_visible: visible,
            ..state
        },
    }
}
