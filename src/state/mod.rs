//! Field and form state

mod field_state;
mod forms;

pub use field_state::*;
pub use forms::*;
