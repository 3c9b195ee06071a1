//! Masked text and money input engine
//!
//! The crate covers the behavior behind a single masked form input:
//!
//! - [`mask`] turns raw keystrokes into display strings (pattern or currency)
//! - [`state::FieldUiState`] tracks focus, blur and error visibility as a pure reducer
//! - [`state::MaskedInput`] registers with a [`state::FormController`] and shows
//!   the first validation error once errors are visible
//!
//! Rendering stays outside: a renderer reads [`state::InputView`] and feeds raw
//! text back through [`state::MaskedInput::on_change`].

pub mod config;
pub mod error;
pub mod mask;
pub mod state;

pub use error::{FieldError, Result};
