/// Where a field's validation message is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDisplay {
    /// Message sits directly after the input (default).
    #[default]
    Below,
    /// Message is shown next to the input on the same line.
    Inline,
    /// Only the invalid styling is applied, the text is suppressed.
    None,
}

impl ErrorDisplay {
    /// Whether a message text should be rendered at all.
    pub fn shows_message(self) -> bool {
        !matches!(self, Self::None)
    }
}
