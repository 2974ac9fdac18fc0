/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name (from `.field()` or the async field config).
    pub field_name: String,
    /// Field ID, used to move focus to the offending input.
    pub widget_id: String,
    /// Message shown to the user.
    pub message: String,
}

impl FieldError {
    pub fn new(
        field_name: impl Into<String>,
        widget_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            widget_id: widget_id.into(),
            message: message.into(),
        }
    }
}

/// Result of validating one or more fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation, in registration order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    /// Build a result from collected errors.
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Get the widget ID of the first invalid field (for focusing).
    pub fn first_invalid_widget(&self) -> Option<&str> {
        self.first_error().map(|e| e.widget_id.as_str())
    }

    /// Look up the error for a field by name.
    pub fn error_for(&self, field_name: &str) -> Option<&FieldError> {
        self.errors().iter().find(|e| e.field_name == field_name)
    }

    /// Append the errors of `other`, keeping order.
    pub fn merge(self, other: ValidationResult) -> Self {
        let mut errors = match self {
            Self::Valid => Vec::new(),
            Self::Invalid(errors) => errors,
        };
        errors.extend(other.errors().iter().cloned());
        Self::from_errors(errors)
    }
}
