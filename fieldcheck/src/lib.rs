//! Client-side form logic for SkillStack.
//!
//! Fields render optimistically from local rules, confirm against the server
//! after a debounce, and only the latest relevant response may change what
//! the user sees. Everything else the pages show (counters, badges, profile
//! completion) is a pure function in [`view`].

pub mod choice;
pub mod debounce;
pub mod error;
pub mod field;
pub mod gate;
pub mod resource;
pub mod sequence;
pub mod text_field;
pub mod validation;
pub mod view;

pub mod prelude {
    pub use crate::choice::{CheckField, ChoiceField};
    pub use crate::debounce::Debouncer;
    pub use crate::error::{
        ConfigError, LocalRule, LocalValidationError, RemoteCheckFailure, SubmitError,
    };
    pub use crate::field::{
        AsyncFieldValidator, FieldConfig, FieldValidationState, RemoteCheck, RemoteStatus,
        RemoteVerdict, check_fn,
    };
    pub use crate::gate::{GateConfig, GateDecision, SubmitGate};
    pub use crate::resource::{Resource, ResourceError, ResourceState};
    pub use crate::sequence::Sequencer;
    pub use crate::text_field::TextField;
    pub use crate::validation::{
        ErrorDisplay, FieldError, Validatable, ValidationResult, Validator,
    };
}
