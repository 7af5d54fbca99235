//! Client side of the contact form: per-field validation state and the
//! submission lifecycle.

pub use display::{FieldDisplay, HoneypotAttributes, HONEYPOT_ATTRIBUTES};
pub use field::FieldValidationState;
pub use form::{ContactForm, FormPhase, TRANSPORT_FAILURE_MESSAGE};

mod display;
mod field;
mod form;
