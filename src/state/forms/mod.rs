//! Form domain layer
//!
//! - `field`: the masked input a renderer drives
//! - `form_state`: the form controller protocol and its in-memory registry
//! - `rules`: validators the registry evaluates

mod field;
mod form_state;
mod rules;

pub use field::{FieldCallbacks, FieldValue, InputProps, InputView, MaskedInput};
pub use form_state::{
    ErrorCallback, FieldRegistration, FormController, FormErrors, FormHandle, FormRegistry,
    SuccessCallback,
};
pub use rules::{evaluate, Rule};
