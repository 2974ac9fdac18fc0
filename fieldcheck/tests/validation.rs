use fieldcheck::choice::{CheckField, ChoiceField};
use fieldcheck::text_field::TextField;
use fieldcheck::validation::{ErrorDisplay, Validatable, ValidationResult, Validator, is_plausible_email};
use regex::Regex;

struct Registration {
    name: TextField,
    email: TextField,
    password: TextField,
    confirm: TextField,
}

impl Registration {
    fn new(name: &str, email: &str, password: &str, confirm: &str) -> Self {
        Self {
            name: TextField::with_value(name),
            email: TextField::with_value(email),
            password: TextField::with_value(password),
            confirm: TextField::with_value(confirm),
        }
    }

    fn validator(&self) -> Validator {
        Validator::new()
            .field(&self.name, "full_name")
            .trimmed()
            .required("Full name is required.")
            .min_length(2, "Name must be at least 2 characters.")
            .field(&self.email, "email")
            .trimmed()
            .required("Email is required.")
            .email("Enter a valid email address.")
            .field(&self.password, "password1")
            .min_length(8, "Password must be at least 8 characters.")
            .field(&self.confirm, "password2")
            .equals_field(&self.password, "Passwords do not match.")
            .build()
    }
}

#[test]
fn test_valid_registration() {
    let form = Registration::new(" Ada Lovelace ", "ada@example.com", "analytical1", "analytical1");
    assert_eq!(form.validator().validate(), ValidationResult::Valid);
    assert!(!form.name.has_error());
}

#[test]
fn test_first_failing_rule_per_field() {
    let form = Registration::new("", "ada@localhost", "short", "other");
    let result = form.validator().validate();

    assert_eq!(result.errors().len(), 4);
    assert_eq!(
        result.error_for("full_name").map(|e| e.message.as_str()),
        Some("Full name is required.")
    );
    assert_eq!(
        result.error_for("email").map(|e| e.message.as_str()),
        Some("Enter a valid email address.")
    );
    assert_eq!(form.password.error().as_deref(), Some("Password must be at least 8 characters."));
    assert_eq!(form.confirm.error().as_deref(), Some("Passwords do not match."));
    assert_eq!(result.first_invalid_widget(), Some(form.name.widget_id().as_str()));
}

#[test]
fn test_validator_is_reusable() {
    let form = Registration::new("A", "ada@example.com", "analytical1", "analytical1");
    let validator = form.validator();

    assert!(validator.validate().is_invalid());
    assert!(form.name.has_error());

    form.name.set_value("Ada");
    assert!(validator.validate().is_valid());
    assert!(!form.name.has_error());
}

#[test]
fn test_confirmation_reads_other_field_live() {
    let form = Registration::new("Ada", "ada@example.com", "analytical1", "analytical1");
    let validator = form.validator();

    form.password.set_value("analytical2");
    let result = validator.validate_field("password2").unwrap();
    assert!(result.is_invalid());
    assert!(validator.validate_field("missing").is_none());
}

#[test]
fn test_pattern_rule() {
    let slug = TextField::with_value("My Project");
    let result = Validator::new()
        .field(&slug, "slug")
        .pattern(Regex::new("^[a-z0-9-]+$").unwrap(), "Use lowercase letters, digits and dashes.")
        .validate();

    assert!(result.is_invalid());
}

#[test]
fn test_focus_by_widget_id() {
    let form = Registration::new("", "", "", "");
    let validator = form.validator();

    assert!(validator.focus(&form.email.widget_id()));
    assert!(form.email.take_focus_request());
    assert!(!form.email.take_focus_request());
    assert!(!validator.focus("__field_unknown"));
}

#[test]
fn test_merge_keeps_errors_from_both() {
    let a = TextField::new();
    let b = TextField::new();
    let left = Validator::new().field(&a, "a").required("A.").validate();
    let right = Validator::new().field(&b, "b").required("B.").validate();

    let merged = left.merge(right);
    assert_eq!(merged.errors().len(), 2);
    assert!(ValidationResult::Valid.merge(ValidationResult::Valid).is_valid());
}

#[test]
fn test_email_shapes() {
    assert!(is_plausible_email("ada@example.com"));
    assert!(is_plausible_email("first.last+tag@sub.example.org"));
    assert!(!is_plausible_email("ada@localhost"));
    assert!(!is_plausible_email("ada example.com"));
    assert!(!is_plausible_email("@example.com"));
    assert!(!is_plausible_email("ada@example."));
    assert!(!is_plausible_email("ada @example.com"));
}

#[test]
fn test_text_field_state() {
    let field = TextField::new();
    assert!(field.is_empty());
    assert!(!field.is_dirty());

    field.set_value("héllo");
    assert_eq!(field.char_count(), 5);
    assert!(field.is_dirty());
    field.clear_dirty();

    field.set_error_display(ErrorDisplay::Inline);
    assert_eq!(field.error_display(), ErrorDisplay::Inline);
    assert!(field.error_display().shows_message());
    assert!(!ErrorDisplay::None.shows_message());

    let clone = field.clone();
    clone.clear();
    assert!(field.is_empty());
    assert_eq!(clone.id(), field.id());
}

fn status_select() -> ChoiceField {
    ChoiceField::new([
        ("ongoing", "Ongoing"),
        ("completed", "Completed"),
        ("paused", "Paused"),
    ])
}

#[test]
fn test_select_requires_a_choice() {
    let title = TextField::with_value("Portfolio site");
    let status = status_select();
    let validator = Validator::new()
        .field(&title, "title")
        .required("Title is required.")
        .field(&status, "status")
        .selected("Select a status.")
        .build();

    let result = validator.validate();
    assert_eq!(
        result.error_for("status").map(|e| e.message.as_str()),
        Some("Select a status.")
    );
    assert_eq!(result.first_invalid_widget(), Some(status.widget_id().as_str()));

    status.select_value("completed");
    assert_eq!(status.selected_index(), Some(1));
    assert_eq!(status.selected_value(), "completed");
    assert!(validator.validate().is_valid());
    assert!(!status.has_error());
}

#[test]
fn test_select_specific_option() {
    let status = status_select();
    status.select(Some(9));
    assert_eq!(status.selected_index(), None);
    assert_eq!(status.selected_value(), "");

    status.select(Some(2));
    let result = Validator::new()
        .field(&status, "status")
        .selected_index(1, "Only completed projects can be featured.")
        .validate();
    assert!(result.is_invalid());

    status.select_value("nonsense");
    assert_eq!(status.selected_index(), None);
}

#[test]
fn test_checkbox_rules() {
    let confirm = CheckField::new();
    let archived = CheckField::with_value(true);
    let validator = Validator::new()
        .field(&confirm, "confirm_delete")
        .checked("Tick the box to confirm.")
        .field(&archived, "archived")
        .unchecked("Archived conversations cannot be replied to.")
        .build();

    let result = validator.validate();
    assert_eq!(result.errors().len(), 2);
    assert_eq!(confirm.error().as_deref(), Some("Tick the box to confirm."));

    confirm.toggle();
    archived.set_value(false);
    assert!(confirm.is_checked());
    assert!(validator.validate().is_valid());
    assert!(confirm.error().is_none());

    validator.focus(&archived.widget_id());
    assert!(archived.take_focus_request());
}
