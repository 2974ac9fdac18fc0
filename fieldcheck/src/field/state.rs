/// Outcome of the last relevant remote check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoteStatus {
    /// No verdict: never checked, locally invalid, or the check failed.
    #[default]
    Unchecked,
    /// A check is scheduled or in flight for the current value.
    Pending,
    /// The server answered for the current value.
    Confirmed { valid: bool },
}

impl RemoteStatus {
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// Snapshot of one monitored field, handed to the state listener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidationState {
    /// Field name from the config.
    pub name: String,
    /// Current input content.
    pub raw_value: String,
    /// Result of the synchronous rules.
    pub local_valid: bool,
    /// Result of the last relevant remote check.
    pub remote_status: RemoteStatus,
    /// Value of the in-flight or last completed remote check.
    pub last_submitted_value_for_check: String,
    /// Token of the latest scheduled check; older completions are stale.
    pub sequence_token: u64,
    /// Message to render next to the field.
    pub error: Option<String>,
    /// The last relevant check failed in transport.
    pub check_failed: bool,
}

impl FieldValidationState {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local_valid: true,
            ..Default::default()
        }
    }

    /// Whether the page should show a "checking…" hint.
    pub fn is_checking(&self) -> bool {
        self.remote_status.is_pending()
    }

    /// Whether the server rejected the current value.
    pub fn is_rejected(&self) -> bool {
        self.remote_status == RemoteStatus::Confirmed { valid: false }
    }
}
