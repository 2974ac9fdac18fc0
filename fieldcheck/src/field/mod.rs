//! Fields confirmed against a remote source of truth.
//!
//! State machine per field:
//!
//! ```text
//! Unchecked ──edit (locally valid)──▶ Pending ──matching response──▶ Confirmed(valid)
//!     ▲                                  │ ▲                               │
//!     └──edit (locally invalid)──────────┘ └──────────edit────────────────┘
//! ```
//!
//! Every transition into `Pending` takes a new sequence token; a response
//! only applies if its token is still current.

mod check;
mod config;
mod state;
mod validator;

pub use check::{FnCheck, RemoteCheck, RemoteVerdict, check_fn};
pub use config::{DEFAULT_DEBOUNCE, FieldConfig, LocalRules, StateListener};
pub use state::{FieldValidationState, RemoteStatus};
pub use validator::AsyncFieldValidator;
