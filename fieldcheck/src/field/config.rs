//! Field validator configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;

use super::check::RemoteCheck;
use super::state::FieldValidationState;
use crate::error::{ConfigError, LocalRule, LocalValidationError};
use crate::text_field::TextField;

/// Callback invoked with a snapshot after every visible state change.
pub type StateListener = Arc<dyn Fn(&FieldValidationState) + Send + Sync>;

/// Quiet period before a remote check is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Synchronous rules checked on every keystroke.
///
/// An empty value (after trimming) skips every rule except `required`, and
/// is never sent to the server.
#[derive(Debug, Clone, Default)]
pub struct LocalRules {
    /// Message when the value is empty, or `None` if the field is optional.
    pub required: Option<String>,
    /// Minimum length in characters.
    pub min_length: Option<(usize, String)>,
    /// Maximum length in characters.
    pub max_length: Option<(usize, String)>,
    /// Pattern the whole value must match.
    pub pattern: Option<(Regex, String)>,
    /// Trim surrounding whitespace before checking and sending.
    pub trim: bool,
}

impl LocalRules {
    /// The value as the rules and the remote check see it.
    pub fn normalize<'a>(&self, value: &'a str) -> &'a str {
        if self.trim { value.trim() } else { value }
    }

    /// Run the rules in order; the first failure wins.
    pub fn check(&self, raw: &str) -> Result<(), LocalValidationError> {
        let value = self.normalize(raw);
        if value.is_empty() {
            return match &self.required {
                Some(msg) => Err(LocalValidationError::new(LocalRule::Required, msg)),
                None => Ok(()),
            };
        }

        let len = value.chars().count();
        if let Some((min, msg)) = &self.min_length
            && len < *min
        {
            return Err(LocalValidationError::new(LocalRule::MinLength, msg));
        }
        if let Some((max, msg)) = &self.max_length
            && len > *max
        {
            return Err(LocalValidationError::new(LocalRule::MaxLength, msg));
        }
        if let Some((re, msg)) = &self.pattern
            && !re.is_match(value)
        {
            return Err(LocalValidationError::new(LocalRule::Pattern, msg));
        }
        Ok(())
    }
}

/// Configuration for [`super::AsyncFieldValidator::attach`].
///
/// # Example
///
/// ```ignore
/// let config = FieldConfig::new("username")
///     .min_local_length(3, "Username must be at least 3 characters.")
///     .remote_check(UsernameCheck::new(client))
///     .on_state_change(|state| render(state));
/// ```
#[derive(Clone)]
pub struct FieldConfig {
    /// Field name, reported in errors and gate results.
    pub name: String,

    /// Synchronous rules.
    pub rules: LocalRules,

    /// Quiet period before a remote check is dispatched.
    ///
    /// Default: 250 ms
    pub debounce: Duration,

    /// Remote source of truth, if the field has one.
    pub remote_check: Option<Arc<dyn RemoteCheck>>,

    /// Called after every visible state change.
    pub on_state_change: Option<StateListener>,

    /// Message used when the server rejects a value without saying why.
    pub rejected_message: String,

    /// Input the validator renders its error onto and focuses on block.
    pub bound_field: Option<TextField>,
}

impl FieldConfig {
    /// Create a config with the given field name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: LocalRules {
                trim: true,
                ..Default::default()
            },
            debounce: DEFAULT_DEBOUNCE,
            remote_check: None,
            on_state_change: None,
            rejected_message: "This value is not available.".to_string(),
            bound_field: None,
        }
    }

    /// Make the field mandatory.
    pub fn required(mut self, msg: impl Into<String>) -> Self {
        self.rules.required = Some(msg.into());
        self
    }

    /// Set the minimum length.
    pub fn min_local_length(mut self, min: usize, msg: impl Into<String>) -> Self {
        self.rules.min_length = Some((min, msg.into()));
        self
    }

    /// Set the maximum length.
    pub fn max_local_length(mut self, max: usize, msg: impl Into<String>) -> Self {
        self.rules.max_length = Some((max, msg.into()));
        self
    }

    /// Set the local pattern.
    pub fn local_pattern(mut self, pattern: Regex, msg: impl Into<String>) -> Self {
        self.rules.pattern = Some((pattern, msg.into()));
        self
    }

    /// Compile and set the local pattern.
    pub fn local_pattern_str(self, pattern: &str, msg: impl Into<String>) -> Result<Self, ConfigError> {
        let re = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            field: self.name.clone(),
            message: e.to_string(),
        })?;
        Ok(self.local_pattern(re, msg))
    }

    /// Check the value exactly as typed, without trimming.
    pub fn keep_whitespace(mut self) -> Self {
        self.rules.trim = false;
        self
    }

    /// Set the debounce delay.
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Set the remote check.
    pub fn remote_check(mut self, check: impl RemoteCheck + 'static) -> Self {
        self.remote_check = Some(Arc::new(check));
        self
    }

    /// Set an already shared remote check.
    pub fn remote_check_arc(mut self, check: Arc<dyn RemoteCheck>) -> Self {
        self.remote_check = Some(check);
        self
    }

    /// Set the state listener.
    pub fn on_state_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldValidationState) + Send + Sync + 'static,
    {
        self.on_state_change = Some(Arc::new(f));
        self
    }

    /// Set the fallback rejection message.
    pub fn rejected_message(mut self, msg: impl Into<String>) -> Self {
        self.rejected_message = msg.into();
        self
    }

    /// Render errors onto `field` and focus it when a submit is blocked.
    pub fn bind(mut self, field: &TextField) -> Self {
        self.bound_field = Some(field.clone());
        self
    }

    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if self.rules.pattern.is_none() && self.remote_check.is_none() {
            return Err(ConfigError::NothingToValidate {
                field: self.name.clone(),
            });
        }
        if let (Some((min, _)), Some((max, _))) = (&self.rules.min_length, &self.rules.max_length)
            && min > max
        {
            return Err(ConfigError::LengthBounds {
                field: self.name.clone(),
                min: *min,
                max: *max,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field("debounce", &self.debounce)
            .field("remote_check", &self.remote_check.is_some())
            .field("on_state_change", &self.on_state_change.is_some())
            .field("bound_field", &self.bound_field.as_ref().map(|f| f.id()))
            .finish()
    }
}
