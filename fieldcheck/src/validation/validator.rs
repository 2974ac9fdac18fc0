//! Validator builder for fluent validation API.

use std::sync::Arc;

use regex::Regex;

use super::result::{FieldError, ValidationResult};
use super::validatable::Validatable;

/// Type alias for sync validation rule closures.
type SyncRule<V> = Box<dyn Fn(&V) -> Result<(), String> + Send + Sync>;

/// Values a [`FieldBuilder`] can validate.
///
/// `normalized` is applied before the rules run when the field was marked
/// with [`FieldBuilder::trimmed`].
pub trait FieldValue: Clone + Send + Sync + 'static {
    fn normalized(self) -> Self {
        self
    }
}

impl FieldValue for String {
    fn normalized(self) -> Self {
        self.trim().to_string()
    }
}

impl FieldValue for bool {}

impl FieldValue for Option<usize> {}

/// Internal representation of a field being validated.
struct FieldEntry {
    name: String,
    widget_id: String,
    set_error: Box<dyn Fn(Option<String>) + Send + Sync>,
    focus: Box<dyn Fn() + Send + Sync>,
    validate: Box<dyn Fn() -> Vec<String> + Send + Sync>,
}

/// Builder for validating multiple form fields synchronously.
///
/// The validator is reusable: [`Validator::validate`] reads the fields'
/// current values each time it runs, so one instance can back both the live
/// per-keystroke checks and the submit gate.
///
/// # Example
///
/// ```ignore
/// let result = Validator::new()
///     .field(&name, "full_name")
///         .trimmed()
///         .min_length(2, "Name must be at least 2 characters.")
///     .field(&email, "email")
///         .trimmed()
///         .email("Enter a valid email address.")
///     .build();
///
/// if result.validate().is_valid() {
///     // Submit form
/// }
/// ```
#[derive(Default)]
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to validate.
    pub fn field<W: Validatable + Clone + 'static>(
        self,
        widget: &W,
        name: impl Into<String>,
    ) -> FieldBuilder<W>
    where
        W::Value: FieldValue,
    {
        FieldBuilder {
            validator: self,
            widget: widget.clone(),
            name: name.into(),
            trim: false,
            sync_rules: Vec::new(),
        }
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Run all rules, pushing the first failure of each field onto it.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        for field in &self.fields {
            if let Some(first_error) = Self::check(field) {
                errors.push(first_error);
            }
        }

        ValidationResult::from_errors(errors)
    }

    /// Validate a single field by name.
    ///
    /// Mirrors the per-input listeners of a live form: only the touched field
    /// is re-rendered. Returns `None` if no field has that name.
    pub fn validate_field(&self, name: &str) -> Option<ValidationResult> {
        let field = self.fields.iter().find(|f| f.name == name)?;
        Some(ValidationResult::from_errors(
            Self::check(field).into_iter().collect(),
        ))
    }

    /// Request focus on the field with the given widget ID.
    pub fn focus(&self, widget_id: &str) -> bool {
        match self.fields.iter().find(|f| f.widget_id == widget_id) {
            Some(field) => {
                (field.focus)();
                true
            }
            None => false,
        }
    }

    fn check(field: &FieldEntry) -> Option<FieldError> {
        let field_errors = (field.validate)();
        match field_errors.into_iter().next() {
            Some(message) => {
                (field.set_error)(Some(message.clone()));
                Some(FieldError::new(&field.name, &field.widget_id, message))
            }
            None => {
                (field.set_error)(None);
                None
            }
        }
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder<W: Validatable> {
    validator: Validator,
    widget: W,
    name: String,
    trim: bool,
    sync_rules: Vec<SyncRule<W::Value>>,
}

impl<W: Validatable + Clone + 'static> FieldBuilder<W>
where
    W::Value: FieldValue,
{
    /// Add a custom synchronous validation rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&W::Value) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.sync_rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Normalize the value (trim text) before the rules see it.
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Continue to the next field.
    pub fn field<W2: Validatable + Clone + 'static>(
        self,
        widget: &W2,
        name: impl Into<String>,
    ) -> FieldBuilder<W2>
    where
        W2::Value: FieldValue,
    {
        let validator = self.finalize();
        validator.field(widget, name)
    }

    /// Finalize and return the reusable validator.
    pub fn build(self) -> Validator {
        self.finalize()
    }

    /// Finalize and run all validations once.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    /// Finalize this field and return the validator.
    fn finalize(self) -> Validator {
        let widget_id = self.widget.widget_id();
        let name = self.name;
        let trim = self.trim;

        let widget_for_rules = self.widget.clone();
        let widget_for_focus = self.widget.clone();
        let widget_for_error = self.widget;

        let sync_rules = Arc::new(self.sync_rules);

        let validate: Box<dyn Fn() -> Vec<String> + Send + Sync> = Box::new(move || {
            let mut value = widget_for_rules.validation_value();
            if trim {
                value = value.normalized();
            }
            sync_rules
                .iter()
                .filter_map(|rule| rule(&value).err())
                .collect()
        });

        let set_error: Box<dyn Fn(Option<String>) + Send + Sync> = Box::new(move |msg| {
            if let Some(msg) = msg {
                widget_for_error.set_error(msg);
            } else {
                widget_for_error.clear_error();
            }
        });

        let focus: Box<dyn Fn() + Send + Sync> = Box::new(move || widget_for_focus.request_focus());

        let mut validator = self.validator;
        validator.fields.push(FieldEntry {
            name,
            widget_id,
            set_error,
            focus,
            validate,
        });

        validator
    }
}

/// Loose email shape check shared by the form rules and the invite chips.
///
/// Requires a syntactically valid address whose domain contains a dot, so
/// `user@localhost` is rejected the same way the registration page did.
pub fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && email_address::EmailAddress::is_valid(value)
        }
        None => false,
    }
}

// Built-in rules for String values
impl<W: Validatable<Value = String> + Clone + 'static> FieldBuilder<W> {
    /// Require the field to be non-empty.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    /// Require the value to match a compiled pattern.
    pub fn pattern(self, pattern: Regex, msg: impl Into<String>) -> Self {
        self.rule(move |v| pattern.is_match(v), msg)
    }

    /// Require a valid email address. Empty passes; pair with `required()`.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_empty() || is_plausible_email(v), msg)
    }

    /// Require the value to equal a fixed value.
    pub fn equals(self, other: String, msg: impl Into<String>) -> Self {
        self.rule(move |v| v == &other, msg)
    }

    /// Require the value to equal another field's current value.
    ///
    /// Used for password confirmation: the other field is read at validation
    /// time, not when the rule is built.
    pub fn equals_field<O>(self, other: &O, msg: impl Into<String>) -> Self
    where
        O: Validatable<Value = String> + Clone + 'static,
    {
        let other = other.clone();
        self.rule(move |v| *v == other.validation_value(), msg)
    }

    /// Require the value to contain a substring.
    pub fn contains(self, substr: impl Into<String>, msg: impl Into<String>) -> Self {
        let substr = substr.into();
        self.rule(move |v| v.contains(&substr), msg)
    }
}

// Built-in rules for checkboxes
impl<W: Validatable<Value = bool> + Clone + 'static> FieldBuilder<W> {
    /// Require the checkbox to be checked.
    pub fn checked(self, msg: impl Into<String>) -> Self {
        self.rule(|&v| v, msg)
    }

    /// Require the checkbox to be unchecked.
    pub fn unchecked(self, msg: impl Into<String>) -> Self {
        self.rule(|&v| !v, msg)
    }
}

// Built-in rules for selects
impl<W: Validatable<Value = Option<usize>> + Clone + 'static> FieldBuilder<W> {
    /// Require that an option is selected.
    pub fn selected(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_some(), msg)
    }

    /// Require a specific option to be selected.
    pub fn selected_index(self, index: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| *v == Some(index), msg)
    }
}
