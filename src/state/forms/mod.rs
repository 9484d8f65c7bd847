//! Form domain layer
//!
//! Section forms edited in the TUI and the field values they hold.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{Form, Section, SectionForm};
