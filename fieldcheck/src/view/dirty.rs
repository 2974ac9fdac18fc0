use std::collections::BTreeMap;

/// Unsaved-changes guard for a form.
///
/// Holds the values the form was rendered with and compares them against the
/// current values on demand. A field missing from the snapshot counts as a
/// change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    initial: BTreeMap<String, String>,
    saving: bool,
}

impl DirtyTracker {
    pub fn new<K, V>(initial: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            initial: initial
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            saving: false,
        }
    }

    /// Whether any current value differs from the snapshot.
    pub fn is_dirty<'a>(&self, current: impl IntoIterator<Item = (&'a str, &'a str)>) -> bool {
        if self.saving {
            return false;
        }
        current
            .into_iter()
            .any(|(k, v)| self.initial.get(k).is_none_or(|initial| initial != v))
    }

    /// Whether leaving the page should prompt the user.
    pub fn should_warn_on_leave<'a>(
        &self,
        current: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> bool {
        self.is_dirty(current)
    }

    /// The form is being submitted; stop warning.
    pub fn mark_saving(&mut self) {
        self.saving = true;
    }

    /// Make the current values the new baseline.
    pub fn mark_saved<'a>(&mut self, current: impl IntoIterator<Item = (&'a str, &'a str)>) {
        self.initial = current
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.saving = false;
    }
}
