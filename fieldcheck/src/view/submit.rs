/// Label shown on every submit button while the form is being saved.
pub const SAVING_LABEL: &str = "Saving…";

/// Double-submit protection for a form's submit buttons.
///
/// Once saving starts every button is disabled and relabelled; the original
/// labels come back on [`SubmitButtons::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtons {
    original: Vec<String>,
    saving: bool,
}

impl SubmitButtons {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            original: labels.into_iter().map(Into::into).collect(),
            saving: false,
        }
    }

    /// Start saving. Returns `false` if a save is already running, in which
    /// case the submit must be dropped.
    pub fn begin_saving(&mut self) -> bool {
        if self.saving {
            return false;
        }
        self.saving = true;
        true
    }

    /// Put the original labels back and re-enable the buttons.
    pub fn restore(&mut self) {
        self.saving = false;
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_disabled(&self) -> bool {
        self.saving
    }

    /// Label for each button, in the order they were given.
    pub fn labels(&self) -> Vec<&str> {
        self.original
            .iter()
            .map(|label| if self.saving { SAVING_LABEL } else { label.as_str() })
            .collect()
    }
}
