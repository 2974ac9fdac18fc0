//! Validatable trait for fields that can carry a validation error.

use super::ErrorDisplay;

/// Trait for form fields that can be validated.
///
/// The validator reads the value through this trait and writes the outcome
/// back as an error message.
pub trait Validatable: Send + Sync {
    /// The value type used for validation.
    type Value;

    /// Extract the current value for validation.
    fn validation_value(&self) -> Self::Value;

    /// Set a validation error on this field.
    fn set_error(&self, msg: impl Into<String>);

    /// Clear the validation error.
    fn clear_error(&self);

    /// Check if the field has a validation error.
    fn has_error(&self) -> bool;

    /// Get the current validation error message (if any).
    fn error(&self) -> Option<String>;

    /// Get the field ID for focusing.
    fn widget_id(&self) -> String;

    /// Ask the surrounding page to move focus to this field.
    fn request_focus(&self);

    /// Get the error display mode.
    fn error_display(&self) -> ErrorDisplay;

    /// Set the error display mode.
    fn set_error_display(&self, display: ErrorDisplay);
}
