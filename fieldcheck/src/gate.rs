//! Form submit gate.

use std::time::Duration;

use crate::error::SubmitError;
use crate::field::AsyncFieldValidator;
use crate::validation::{FieldError, ValidationResult, Validator};

/// Message for a field that is neither acceptable nor pending but carries no
/// error of its own.
const UNVERIFIED_MESSAGE: &str = "Please check this field.";

/// Submit gate timing.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Wait between attempts while a remote check is pending.
    ///
    /// Default: 150 ms
    pub retry_delay: Duration,

    /// Attempts to wait before falling back to local validity.
    ///
    /// Default: 20 (3 s with the default delay)
    pub max_deferrals: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_millis(150),
            max_deferrals: 20,
        }
    }
}

impl GateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry delay.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the maximum number of deferrals.
    pub fn max_deferrals(mut self, n: u32) -> Self {
        self.max_deferrals = n;
        self
    }
}

/// What the gate decided for one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Every field is acceptable.
    Submit,
    /// A remote answer is imminent; try again shortly.
    Defer,
    /// At least one field is invalid.
    Block(ValidationResult),
}

enum GateEntry {
    Sync(Validator),
    Async(AsyncFieldValidator),
}

/// Decides whether a form may be submitted.
///
/// Definite errors block right away, since no remote answer can fix them. A
/// pending remote check defers the submission instead of rejecting it: the
/// user already passed the local rules and the answer is on its way. If the
/// answer never comes the gate stops waiting after
/// [`GateConfig::max_deferrals`] and judges the pending fields by their local
/// rules alone.
///
/// # Example
///
/// ```ignore
/// let gate = SubmitGate::new()
///     .validator(profile_rules)
///     .field(&username);
///
/// match gate.submit().await {
///     Ok(()) => post_form().await,
///     Err(e) => log::debug!("submit blocked: {e}"),
/// }
/// ```
#[derive(Default)]
pub struct SubmitGate {
    entries: Vec<GateEntry>,
    config: GateConfig,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the timing config.
    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Gate on a set of synchronous rules.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.entries.push(GateEntry::Sync(validator));
        self
    }

    /// Gate on a remotely confirmed field.
    pub fn field(mut self, field: &AsyncFieldValidator) -> Self {
        self.entries.push(GateEntry::Async(field.clone()));
        self
    }

    /// Judge one submit attempt without waiting.
    pub fn evaluate(&self) -> GateDecision {
        self.decide(false)
    }

    /// Try to submit, waiting out pending remote checks.
    ///
    /// Flushes every debounced field first so nothing waits for a timer. On
    /// refusal, focus is requested on the first offending field.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        for entry in &self.entries {
            if let GateEntry::Async(field) = entry {
                field.flush_now();
            }
        }

        let mut deferrals = 0;
        loop {
            let decision = if deferrals >= self.config.max_deferrals {
                log::debug!("submit gate: stopped waiting after {deferrals} deferrals");
                self.decide(true)
            } else {
                self.decide(false)
            };

            match decision {
                GateDecision::Submit => return Ok(()),
                GateDecision::Block(result) => {
                    if let Some(widget_id) = result.first_invalid_widget() {
                        self.focus(widget_id);
                    }
                    return Err(SubmitError::Invalid(result));
                }
                GateDecision::Defer => {
                    deferrals += 1;
                    tokio::time::sleep(self.config.retry_delay).await;
                }
            }
        }
    }

    fn decide(&self, pending_ok: bool) -> GateDecision {
        let mut errors = Vec::new();
        let mut pending = false;

        for entry in &self.entries {
            match entry {
                GateEntry::Sync(validator) => {
                    errors.extend(validator.validate().errors().iter().cloned());
                }
                GateEntry::Async(field) => {
                    let (acceptable, state) = field.gate_snapshot(pending_ok);
                    if acceptable {
                        continue;
                    }
                    if state.local_valid && state.remote_status.is_pending() {
                        pending = true;
                        continue;
                    }
                    errors.push(FieldError::new(
                        field.name(),
                        field.widget_id(),
                        state.error.unwrap_or_else(|| UNVERIFIED_MESSAGE.to_string()),
                    ));
                }
            }
        }

        if !errors.is_empty() {
            GateDecision::Block(ValidationResult::from_errors(errors))
        } else if pending {
            GateDecision::Defer
        } else {
            GateDecision::Submit
        }
    }

    fn focus(&self, widget_id: &str) {
        for entry in &self.entries {
            match entry {
                GateEntry::Sync(validator) => {
                    if validator.focus(widget_id) {
                        return;
                    }
                }
                GateEntry::Async(field) => {
                    if field.widget_id() == widget_id {
                        field.request_focus();
                        return;
                    }
                }
            }
        }
    }
}
