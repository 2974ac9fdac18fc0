use serde::Serialize;

/// Remaining-characters counter for a text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    pub max: usize,
}

/// What the counter shows for one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterView {
    pub used: usize,
    pub remaining: usize,
    pub over_limit: bool,
}

impl CounterView {
    pub fn text(&self) -> String {
        format!("{} characters remaining", self.remaining)
    }
}

impl CharCounter {
    /// Profile bio.
    pub const BIO: Self = Self { max: 300 };
    /// Project description.
    pub const DESCRIPTION: Self = Self { max: 1000 };

    pub fn new(max: usize) -> Self {
        Self { max }
    }

    /// Use the input's `maxlength` when it parses to a positive number.
    pub fn from_max_attr(attr: Option<&str>, fallback: usize) -> Self {
        let max = attr
            .and_then(|a| a.trim().parse::<usize>().ok())
            .filter(|&m| m > 0)
            .unwrap_or(fallback);
        Self { max }
    }

    pub fn render(&self, text: &str) -> CounterView {
        let used = text.chars().count();
        CounterView {
            used,
            remaining: self.max.saturating_sub(used),
            over_limit: used > self.max,
        }
    }

    /// `"<label> cannot exceed <max> characters."` when over the limit.
    pub fn limit_error(&self, label: &str, text: &str) -> Option<String> {
        self.render(text)
            .over_limit
            .then(|| format!("{label} cannot exceed {} characters.", self.max))
    }
}
