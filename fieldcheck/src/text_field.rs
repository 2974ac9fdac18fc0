use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::validation::{ErrorDisplay, Validatable};

/// Unique identifier for a text field instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Internal state for a text field
#[derive(Debug, Default)]
struct TextFieldInner {
    /// Current text value
    value: String,
    /// Validation error message (if any)
    error: Option<String>,
    /// How to display validation errors
    error_display: ErrorDisplay,
}

/// A text input with shared, thread-safe state.
///
/// `TextField` is the render target for validation: the page writes the
/// user's text into it, validators write error messages back, and the page
/// polls [`TextField::is_dirty`] and [`TextField::take_focus_request`] to know
/// what to redraw. Clones share the same state.
///
/// # Example
///
/// ```ignore
/// let username = TextField::new();
/// username.set_value("admin");
/// assert_eq!(username.value(), "admin");
/// username.set_error("This username is already taken.");
/// ```
#[derive(Debug)]
pub struct TextField {
    /// Unique identifier for this field instance
    id: FieldId,
    /// Internal state
    inner: Arc<RwLock<TextFieldInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Focus request flag (checked by the page)
    focus_requested: Arc<AtomicBool>,
}

impl TextField {
    /// Create a new empty field
    pub fn new() -> Self {
        Self::with_value(String::new())
    }

    /// Create a field with an initial value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            id: FieldId::new(),
            inner: Arc::new(RwLock::new(TextFieldInner {
                value: value.into(),
                ..Default::default()
            })),
            dirty: Arc::new(AtomicBool::new(false)),
            focus_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the current text value
    pub fn value(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Check if the field is empty
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.value.is_empty())
            .unwrap_or(true)
    }

    /// Length of the current value in characters
    pub fn char_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.value.chars().count())
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set the text value
    pub fn set_value(&self, value: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Clear the field value
    pub fn clear(&self) {
        self.set_value(String::new());
    }

    /// Check if the field has changed since the last render
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Consume a pending focus request.
    pub fn take_focus_request(&self) -> bool {
        self.focus_requested.swap(false, Ordering::SeqCst)
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TextField {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            focus_requested: Arc::clone(&self.focus_requested),
        }
    }
}

impl Validatable for TextField {
    type Value = String;

    fn validation_value(&self) -> String {
        self.value()
    }

    fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = Some(msg.into());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn clear_error(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.error.take().is_some()
        {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn has_error(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.error.is_some())
            .unwrap_or(false)
    }

    fn error(&self) -> Option<String> {
        self.inner.read().ok().and_then(|guard| guard.error.clone())
    }

    fn widget_id(&self) -> String {
        self.id.to_string()
    }

    fn request_focus(&self) {
        self.focus_requested.store(true, Ordering::SeqCst);
    }

    fn error_display(&self) -> ErrorDisplay {
        self.inner
            .read()
            .map(|guard| guard.error_display)
            .unwrap_or_default()
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error_display = display;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }
}
