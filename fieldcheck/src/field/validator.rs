//! Debounced remote validation for a single field.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::check::{RemoteCheck, RemoteVerdict};
use super::config::FieldConfig;
use super::state::{FieldValidationState, RemoteStatus};
use crate::debounce::Debouncer;
use crate::error::{ConfigError, RemoteCheckFailure};
use crate::sequence::Sequencer;
use crate::validation::Validatable;

/// A remote check ready to be sent.
struct Dispatch {
    token: u64,
    value: String,
    check: Arc<dyn RemoteCheck>,
}

struct Shared {
    config: FieldConfig,
    state: Mutex<FieldValidationState>,
    sequencer: Sequencer,
    /// Present iff a remote check is configured.
    debouncer: Option<Debouncer>,
    /// Bumped under the state lock each time a snapshot is taken.
    revision: AtomicU64,
    /// Revision last pushed to the page. Held while pushing.
    emitted: Mutex<u64>,
}

/// Validates one field locally on every keystroke and confirms it against a
/// remote source of truth once typing pauses.
///
/// The field renders optimistically from local state, a debounced check is
/// sent for locally valid values, and only the completion carrying the latest
/// sequence token may change the visible state. Transport failures fail open:
/// the field falls back to its local result.
///
/// Cheap to clone; clones drive the same field. Remote checks run as tasks on
/// the tokio runtime that was current at [`AsyncFieldValidator::attach`].
///
/// # Example
///
/// ```ignore
/// let username = AsyncFieldValidator::attach(
///     FieldConfig::new("username")
///         .min_local_length(3, "Username must be at least 3 characters.")
///         .remote_check(UsernameCheck::new(client)),
/// )?;
///
/// username.on_input("adm");
/// username.on_input("admin");
/// // 250 ms later one request is sent, for "admin"
/// ```
#[derive(Clone)]
pub struct AsyncFieldValidator {
    shared: Arc<Shared>,
}

impl AsyncFieldValidator {
    /// Attach a validator to a field.
    ///
    /// Fails if there is nothing to validate (no local pattern and no remote
    /// check), if the length bounds contradict, or if a remote check is
    /// configured outside a tokio runtime.
    pub fn attach(config: FieldConfig) -> Result<Self, ConfigError> {
        config.check()?;

        let debouncer = match config.remote_check {
            Some(_) => Some(Debouncer::try_current().ok_or_else(|| ConfigError::NoRuntime {
                field: config.name.clone(),
            })?),
            None => None,
        };

        let mut state = FieldValidationState::new(&config.name);
        if let Some(field) = &config.bound_field {
            state.raw_value = field.value();
        }
        state.local_valid = config.rules.check(&state.raw_value).is_ok();

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(state),
                sequencer: Sequencer::new(),
                debouncer,
                revision: AtomicU64::new(0),
                emitted: Mutex::new(0),
            }),
        })
    }

    /// Field name from the config.
    pub fn name(&self) -> &str {
        &self.shared.config.name
    }

    /// ID used to focus the field: the bound input's ID, else the name.
    pub fn widget_id(&self) -> String {
        match &self.shared.config.bound_field {
            Some(field) => field.widget_id(),
            None => self.shared.config.name.clone(),
        }
    }

    /// Whether a remote check is configured.
    pub fn has_remote_check(&self) -> bool {
        self.shared.config.remote_check.is_some()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FieldValidationState {
        self.shared.lock().clone()
    }

    /// Handle an input event.
    ///
    /// Local rules run immediately. A locally valid value arms the debounce
    /// timer (replacing any armed one) and marks the field pending; a locally
    /// invalid value resets the remote status and sends nothing.
    pub fn on_input(&self, value: impl Into<String>) {
        let mut state = self.shared.lock();
        state.raw_value = value.into();
        self.evaluate(&mut state);
        self.shared.publish(state);
    }

    /// Handle a blur event: re-run local rules and send the check now.
    pub fn on_blur(&self) -> bool {
        let mut state = self.shared.lock();
        self.evaluate(&mut state);
        self.shared.publish(state);
        self.flush_now()
    }

    /// Skip the debounce and send the remote check immediately.
    ///
    /// Does nothing if the value is locally invalid, already confirmed, or
    /// already in flight. Returns `true` if a check was dispatched.
    pub fn flush_now(&self) -> bool {
        let Some(debouncer) = &self.shared.debouncer else {
            return false;
        };

        let mut state = self.shared.lock();
        let timer_armed = debouncer.cancel();
        let candidate = self.shared.config.rules.normalize(&state.raw_value);
        let needed = timer_armed
            || match state.remote_status {
                RemoteStatus::Confirmed { .. } => state.last_submitted_value_for_check != candidate,
                RemoteStatus::Pending => false,
                RemoteStatus::Unchecked => true,
            };
        if !needed {
            return false;
        }
        let Some(dispatch) = self.shared.prepare_dispatch(&mut state) else {
            return false;
        };

        self.shared.publish(state);
        Shared::dispatch(&self.shared, dispatch);
        true
    }

    /// Whether the field may be submitted right now.
    ///
    /// True only if the local rules pass and, when a remote check is
    /// configured, the server confirmed the current value. False while a check
    /// is pending. After a transport failure the local result stands.
    pub fn currently_acceptable(&self) -> bool {
        let state = self.shared.lock();
        self.shared.acceptable(&state, false)
    }

    /// Like [`Self::currently_acceptable`], but a pending check counts as
    /// passing. Used when the submit gate stops waiting on a hung request.
    pub fn locally_acceptable(&self) -> bool {
        let state = self.shared.lock();
        self.shared.acceptable(&state, true)
    }

    /// Acceptability and state read under one lock, for the submit gate.
    pub(crate) fn gate_snapshot(&self, pending_ok: bool) -> (bool, FieldValidationState) {
        let state = self.shared.lock();
        (self.shared.acceptable(&state, pending_ok), state.clone())
    }

    /// Whether a check is scheduled or in flight.
    pub fn is_pending(&self) -> bool {
        self.shared.lock().remote_status.is_pending()
    }

    /// Ask the page to focus the bound input.
    pub fn request_focus(&self) {
        if let Some(field) = &self.shared.config.bound_field {
            field.request_focus();
        }
    }

    /// Stop validating: disarm the timer and make in-flight checks stale.
    pub fn detach(&self) {
        let mut state = self.shared.lock();
        if let Some(debouncer) = &self.shared.debouncer {
            debouncer.cancel();
        }
        self.shared.supersede(&mut state);
        self.shared.publish(state);
    }

    /// Re-run the local rules on `state.raw_value` and decide what to do
    /// remotely.
    fn evaluate(&self, state: &mut FieldValidationState) {
        let shared = &self.shared;
        let local = shared.config.rules.check(&state.raw_value);
        state.local_valid = local.is_ok();

        let Some(debouncer) = &shared.debouncer else {
            state.error = local.err().map(|e| e.message);
            return;
        };

        if let Err(e) = local {
            debouncer.cancel();
            shared.supersede(state);
            state.error = Some(e.message);
            return;
        }

        let candidate = shared.config.rules.normalize(&state.raw_value).to_string();
        if candidate.is_empty() {
            debouncer.cancel();
            shared.supersede(state);
            state.error = None;
            return;
        }

        let settled = candidate == state.last_submitted_value_for_check
            && match state.remote_status {
                RemoteStatus::Confirmed { .. } => true,
                RemoteStatus::Pending => !debouncer.is_pending(),
                RemoteStatus::Unchecked => false,
            };
        if settled {
            return;
        }

        state.sequence_token = shared.sequencer.next();
        state.remote_status = RemoteStatus::Pending;
        state.check_failed = false;
        state.error = None;

        let weak = Arc::downgrade(shared);
        debouncer.schedule(shared.config.debounce, move || Shared::fire(&weak));
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, FieldValidationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acceptable(&self, state: &FieldValidationState, pending_ok: bool) -> bool {
        if !state.local_valid {
            return false;
        }
        if self.config.remote_check.is_none() {
            return true;
        }
        if self.config.rules.normalize(&state.raw_value).is_empty() {
            return true;
        }
        match state.remote_status {
            RemoteStatus::Confirmed { valid } => valid,
            RemoteStatus::Pending => pending_ok,
            RemoteStatus::Unchecked => state.check_failed || pending_ok,
        }
    }

    /// Drop any outstanding check and return to `Unchecked`.
    fn supersede(&self, state: &mut FieldValidationState) {
        state.sequence_token = self.sequencer.invalidate();
        state.remote_status = RemoteStatus::Unchecked;
        state.check_failed = false;
    }

    fn prepare_dispatch(&self, state: &mut FieldValidationState) -> Option<Dispatch> {
        let check = self.config.remote_check.clone()?;
        if !state.local_valid {
            return None;
        }
        let value = self.config.rules.normalize(&state.raw_value).to_string();
        if value.is_empty() {
            return None;
        }

        let token = self.sequencer.next();
        state.sequence_token = token;
        state.last_submitted_value_for_check = value.clone();
        state.remote_status = RemoteStatus::Pending;
        state.check_failed = false;
        state.error = None;

        Some(Dispatch {
            token,
            value,
            check,
        })
    }

    /// Debounce timer fired.
    fn fire(weak: &Weak<Shared>) {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut state = shared.lock();
        if let Some(dispatch) = shared.prepare_dispatch(&mut state) {
            shared.publish(state);
            Shared::dispatch(&shared, dispatch);
        }
    }

    fn dispatch(shared: &Arc<Shared>, dispatch: Dispatch) {
        let Some(debouncer) = &shared.debouncer else {
            return;
        };
        log::debug!(
            "field '{}': checking {:?} (token {})",
            shared.config.name,
            dispatch.value,
            dispatch.token
        );

        let weak = Arc::downgrade(shared);
        debouncer.runtime().spawn(async move {
            let result = dispatch.check.check(&dispatch.value).await;
            if let Some(shared) = weak.upgrade() {
                shared.complete(dispatch.token, result);
            }
        });
    }

    fn complete(&self, token: u64, result: Result<RemoteVerdict, RemoteCheckFailure>) {
        let mut state = self.lock();
        if !self.sequencer.is_current(token) {
            log::trace!(
                "field '{}': dropping stale response (token {} < {})",
                self.config.name,
                token,
                self.sequencer.current()
            );
            return;
        }

        match result {
            Ok(verdict) => {
                state.remote_status = RemoteStatus::Confirmed {
                    valid: verdict.valid,
                };
                state.check_failed = false;
                state.error = if verdict.valid {
                    None
                } else {
                    Some(
                        verdict
                            .message
                            .unwrap_or_else(|| self.config.rejected_message.clone()),
                    )
                };
            }
            Err(failure) => {
                log::debug!(
                    "field '{}': remote check failed, falling back to local rules: {}",
                    self.config.name,
                    failure
                );
                state.remote_status = RemoteStatus::Unchecked;
                state.check_failed = true;
                state.error = None;
            }
        }
        self.publish(state);
    }

    /// Snapshot the state, release the lock, and push the snapshot out.
    fn publish(&self, state: MutexGuard<'_, FieldValidationState>) {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = state.clone();
        drop(state);
        self.emit(revision, &snapshot);
    }

    /// Push the snapshot to the bound input and the listener, unless a newer
    /// one already went out. The listener must not drive this field.
    fn emit(&self, revision: u64, snapshot: &FieldValidationState) {
        let mut emitted = self.emitted.lock().unwrap_or_else(PoisonError::into_inner);
        if revision <= *emitted {
            log::trace!(
                "field '{}': skipping superseded snapshot (revision {} <= {})",
                self.config.name,
                revision,
                *emitted
            );
            return;
        }
        *emitted = revision;

        if let Some(field) = &self.config.bound_field {
            match &snapshot.error {
                Some(msg) => field.set_error(msg.clone()),
                None => field.clear_error(),
            }
        }
        if let Some(listener) = &self.config.on_state_change {
            listener(snapshot);
        }
    }
}
