use serde::Serialize;

use super::badge::{Badge, BadgeTone};
use crate::validation::is_plausible_email;

/// How one comma-separated entry of the invite box was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteKind {
    /// Already a collaborator; shown but dropped.
    AlreadyInvited,
    /// Not an email address; shown but dropped.
    Malformed,
    /// A new, well-formed address; kept.
    Valid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteChip {
    pub email: String,
    pub kind: InviteKind,
}

impl InviteChip {
    pub fn badge(&self) -> Badge {
        match self.kind {
            InviteKind::AlreadyInvited => {
                Badge::new(format!("{} (Already invited)", self.email), BadgeTone::Danger)
            }
            InviteKind::Malformed => Badge::new(self.email.clone(), BadgeTone::Neutral),
            InviteKind::Valid => Badge::new(self.email.clone(), BadgeTone::Secondary),
        }
    }
}

/// Parsed content of the "invite emails" box of the project editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InviteList {
    pub chips: Vec<InviteChip>,
}

impl InviteList {
    /// Split on commas, classify each entry. Collaborator matching ignores
    /// case.
    pub fn parse<S: AsRef<str>>(input: &str, collaborators: &[S]) -> Self {
        let known: Vec<String> = collaborators
            .iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .collect();

        let chips = input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let kind = if known.contains(&p.to_lowercase()) {
                    InviteKind::AlreadyInvited
                } else if !is_plausible_email(p) {
                    InviteKind::Malformed
                } else {
                    InviteKind::Valid
                };
                InviteChip {
                    email: p.to_string(),
                    kind,
                }
            })
            .collect();

        Self { chips }
    }

    /// Addresses that will actually be invited.
    pub fn valid(&self) -> impl Iterator<Item = &str> {
        self.chips
            .iter()
            .filter(|c| c.kind == InviteKind::Valid)
            .map(|c| c.email.as_str())
    }

    /// The value written back into the box: valid new addresses only.
    pub fn normalized(&self) -> String {
        self.valid().collect::<Vec<_>>().join(", ")
    }
}
