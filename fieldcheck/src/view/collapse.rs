pub const DEFAULT_SHOW_LABEL: &str = "Show Projects";
pub const DEFAULT_HIDE_LABEL: &str = "Hide Projects";

/// Show/hide button for a collapsible section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseToggle {
    expanded: bool,
    show_label: String,
    hide_label: String,
}

impl CollapseToggle {
    /// Labels fall back to the defaults when missing or blank.
    pub fn new(show_label: Option<&str>, hide_label: Option<&str>, start_collapsed: bool) -> Self {
        let pick = |label: Option<&str>, default: &str| {
            label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Self {
            expanded: !start_collapsed,
            show_label: pick(show_label, DEFAULT_SHOW_LABEL),
            hide_label: pick(hide_label, DEFAULT_HIDE_LABEL),
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Button text: offers the opposite of the current state.
    pub fn label(&self) -> &str {
        if self.expanded { &self.hide_label } else { &self.show_label }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }
}

impl Default for CollapseToggle {
    fn default() -> Self {
        Self::new(None, None, false)
    }
}
