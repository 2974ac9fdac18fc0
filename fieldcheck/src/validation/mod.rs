//! Synchronous form validation.
//!
//! A fluent API for the per-field rules of the SkillStack forms (length,
//! pattern, email, password confirmation). Fields whose validity also depends
//! on the server go through [`crate::field::AsyncFieldValidator`] instead;
//! both feed the [`crate::gate::SubmitGate`].
//!
//! # Example
//!
//! ```ignore
//! use fieldcheck::validation::Validator;
//!
//! let validator = Validator::new()
//!     .field(&password1, "password1")
//!         .min_length(8, "Password must be at least 8 characters.")
//!     .field(&password2, "password2")
//!         .equals_field(&password1, "Passwords do not match.")
//!     .build();
//!
//! let result = validator.validate();
//! if let Some(id) = result.first_invalid_widget() {
//!     validator.focus(id);
//! }
//! ```

mod error_display;
mod result;
mod validatable;
mod validator;

pub use error_display::ErrorDisplay;
pub use result::{FieldError, ValidationResult};
pub use validatable::Validatable;
pub use validator::{FieldBuilder, FieldValue, Validator, is_plausible_email};
