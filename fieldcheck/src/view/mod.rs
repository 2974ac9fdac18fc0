//! Pure view models.
//!
//! Each function maps an explicit input record to what the page renders.
//! Nothing here reads from or writes to a page; the caller owns both ends.

mod alerts;
mod badge;
mod collapse;
mod completion;
mod counter;
mod dates;
mod dirty;
mod files;
mod invites;
mod preview;
mod share;
mod strength;
mod submit;

pub use alerts::{Alert, AlertDismissal};
pub use badge::{Badge, BadgeTone, ProjectStatus, status_badge, unread_badge};
pub use collapse::{CollapseToggle, DEFAULT_HIDE_LABEL, DEFAULT_SHOW_LABEL};
pub use completion::{ProfileCompletion, ProfileFields};
pub use counter::{CharCounter, CounterView};
pub use dates::{DateRange, END_BEFORE_START};
pub use dirty::DirtyTracker;
pub use files::{StageError, StagedFile, StagedFiles, format_bytes, is_image};
pub use invites::{InviteChip, InviteKind, InviteList};
pub use preview::{PreviewText, TITLE_PLACEHOLDER, URL_PLACEHOLDER, is_previewable_url};
pub use share::{LINK_COPIED, SHARE_TEXT, ShareAction, ShareData};
pub use strength::{StrengthLabel, password_score, password_strength};
pub use submit::{SAVING_LABEL, SubmitButtons};
