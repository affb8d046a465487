//! Request middleware.
//!
//! [`Trace`] correlates each request; [`ErrorTranslator`] shapes every error
//! response. Wrap the translator inside `Trace` so error bodies can read the
//! active trace identifier.

pub mod error_translator;
pub mod trace;

pub use error_translator::{ErrorTranslator, StackDisclosure};
pub use trace::Trace;
