//! Request-level rules that sit between the handlers and the repository.

mod references;
mod validation;
pub use references::{ReferenceResolver, SpeakerRef};
pub use validation::{RequestValidator, ValidationRule};
