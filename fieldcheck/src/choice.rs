//! Checkbox and select controls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::text_field::FieldId;
use crate::validation::{ErrorDisplay, Validatable};

#[derive(Debug, Default)]
struct ControlInner<T> {
    value: T,
    error: Option<String>,
    error_display: ErrorDisplay,
}

/// A form control holding a non-text value, with the same error and focus
/// plumbing as [`crate::text_field::TextField`]. Clones share state.
#[derive(Debug)]
pub struct Control<T> {
    id: FieldId,
    inner: Arc<RwLock<ControlInner<T>>>,
    focus_requested: Arc<AtomicBool>,
}

/// A checkbox.
pub type CheckField = Control<bool>;

impl<T: Clone + Default> Control<T> {
    pub fn new() -> Self {
        Self::with_value(T::default())
    }

    pub fn with_value(value: T) -> Self {
        Self {
            id: FieldId::new(),
            inner: Arc::new(RwLock::new(ControlInner {
                value,
                error: None,
                error_display: ErrorDisplay::default(),
            })),
            focus_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn value(&self) -> T {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    pub fn set_value(&self, value: T) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value;
        }
    }

    /// Consume a pending focus request.
    pub fn take_focus_request(&self) -> bool {
        self.focus_requested.swap(false, Ordering::SeqCst)
    }
}

impl<T: Clone + Default> Default for Control<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Control<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            focus_requested: Arc::clone(&self.focus_requested),
        }
    }
}

impl CheckField {
    pub fn is_checked(&self) -> bool {
        self.value()
    }

    pub fn toggle(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = !guard.value;
        }
    }
}

impl<T: Clone + Default + Send + Sync> Validatable for Control<T> {
    type Value = T;

    fn validation_value(&self) -> T {
        self.value()
    }

    fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = Some(msg.into());
        }
    }

    fn clear_error(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = None;
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
        }
    }
}

/// A `<select>` with `(value, label)` options. An empty-valued placeholder
/// option is not listed; selecting nothing leaves the index at `None`.
#[derive(Debug, Clone)]
pub struct ChoiceField {
    options: Arc<Vec<(String, String)>>,
    control: Control<Option<usize>>,
}

impl ChoiceField {
    pub fn new<V, L>(options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self {
            options: Arc::new(
                options
                    .into_iter()
                    .map(|(v, l)| (v.into(), l.into()))
                    .collect(),
            ),
            control: Control::new(),
        }
    }

    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.control.value()
    }

    /// The submitted value of the selected option, or `""` for none.
    pub fn selected_value(&self) -> &str {
        self.selected_index()
            .and_then(|i| self.options.get(i))
            .map(|(v, _)| v.as_str())
            .unwrap_or("")
    }

    /// Select by index. Out-of-range indices clear the selection.
    pub fn select(&self, index: Option<usize>) {
        self.control
            .set_value(index.filter(|&i| i < self.options.len()));
    }

    /// Select by submitted value; unknown values clear the selection.
    pub fn select_value(&self, value: &str) {
        let index = self.options.iter().position(|(v, _)| v == value);
        self.control.set_value(index);
    }

    pub fn take_focus_request(&self) -> bool {
        self.control.take_focus_request()
    }
}

impl Validatable for ChoiceField {
    type Value = Option<usize>;

    fn validation_value(&self) -> Option<usize> {
        self.control.validation_value()
    }

    fn set_error(&self, msg: impl Into<String>) {
        self.control.set_error(msg);
    }

    fn clear_error(&self) {
        self.control.clear_error();
    }

    fn has_error(&self) -> bool {
        self.control.has_error()
    }

    fn error(&self) -> Option<String> {
        self.control.error()
    }

    fn widget_id(&self) -> String {
        self.control.widget_id()
    }

    fn request_focus(&self) {
        self.control.request_focus();
    }

    fn error_display(&self) -> ErrorDisplay {
        self.control.error_display()
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        self.control.set_error_display(display);
    }
}
