use serde::Serialize;

/// Text attached to a shared portfolio link.
pub const SHARE_TEXT: &str = "Check out this portfolio!";
/// Notice after the link was copied instead of shared.
pub const LINK_COPIED: &str = "Link copied to clipboard!";

/// Payload for the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// What the share button does on this device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    /// Open the native share sheet.
    Native(ShareData),
    /// Copy the URL to the clipboard.
    CopyLink(String),
}

impl ShareAction {
    /// Prefer the native share sheet, fall back to copying the link.
    pub fn choose(title: &str, url: &str, native_share: bool) -> Self {
        if native_share {
            Self::Native(ShareData {
                title: title.to_string(),
                text: SHARE_TEXT.to_string(),
                url: url.to_string(),
            })
        } else {
            Self::CopyLink(url.to_string())
        }
    }

    /// Notice to show once the action finished. Failures are only logged.
    pub fn notice(&self, outcome: Result<(), String>) -> Option<&'static str> {
        match (self, outcome) {
            (Self::CopyLink(_), Ok(())) => Some(LINK_COPIED),
            (Self::Native(_), Ok(())) => None,
            (action, Err(e)) => {
                log::debug!("share via {action:?} failed: {e}");
                None
            }
        }
    }
}
