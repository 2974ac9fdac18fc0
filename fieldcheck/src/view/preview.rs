use serde::Serialize;

pub const TITLE_PLACEHOLDER: &str = "Title will appear here";
pub const URL_PLACEHOLDER: &str = "https://your-link.example";

/// Texts of the live portfolio card next to the link form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewText {
    pub title: String,
    pub url: String,
    /// Background image, or `None` for the "Preview" placeholder.
    pub thumbnail: Option<String>,
}

impl PreviewText {
    pub fn render(title: &str, url: &str, thumbnail: Option<&str>) -> Self {
        let or = |v: &str, fallback: &str| {
            if v.is_empty() {
                fallback.to_string()
            } else {
                v.to_string()
            }
        };
        Self {
            title: or(title, TITLE_PLACEHOLDER),
            url: or(url, URL_PLACEHOLDER),
            thumbnail: thumbnail.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }
}

/// Whether a value looks like an absolute http(s) link worth previewing.
pub fn is_previewable_url(value: &str) -> bool {
    let v = value.trim();
    ["http://", "https://"].iter().any(|scheme| {
        v.get(..scheme.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(scheme))
    })
}
