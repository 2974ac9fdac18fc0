use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Colour of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
    Secondary,
    Neutral,
}

impl BadgeTone {
    /// Bootstrap classes the templates style badges with.
    pub fn css_classes(self) -> &'static str {
        match self {
            Self::Success => "badge bg-success",
            Self::Warning => "badge bg-warning text-dark",
            Self::Danger => "badge bg-danger",
            Self::Secondary => "badge bg-secondary",
            Self::Neutral => "badge text-bg-light border",
        }
    }
}

/// A small status pill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub tone: BadgeTone,
    pub visible: bool,
}

impl Badge {
    pub fn new(text: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            text: text.into(),
            tone,
            visible: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            text: String::new(),
            tone: BadgeTone::Neutral,
            visible: false,
        }
    }
}

/// Project status as stored by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Ongoing,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            other => Err(format!("unknown project status: {other}")),
        }
    }
}

/// Live badge for the status select of the project editor.
///
/// Any non-empty value other than `completed` or `ongoing` renders as
/// paused; an empty selection asks the user to pick one.
pub fn status_badge(value: &str) -> Badge {
    match value {
        "" => Badge::new("Select a status", BadgeTone::Neutral),
        "completed" => Badge::new("Completed", BadgeTone::Success),
        "ongoing" => Badge::new("Ongoing", BadgeTone::Warning),
        _ => Badge::new("Paused", BadgeTone::Danger),
    }
}

/// Unread-message badge: hidden at zero.
pub fn unread_badge(count: u64) -> Badge {
    if count == 0 {
        Badge::hidden()
    } else {
        Badge::new(count.to_string(), BadgeTone::Danger)
    }
}
