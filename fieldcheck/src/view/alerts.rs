use std::time::{Duration, Instant};

/// One flash message on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: String,
    pub shown_at: Instant,
    pub visible: bool,
}

impl Alert {
    pub fn new(id: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            id: id.into(),
            shown_at,
            visible: true,
        }
    }
}

/// When flash messages close by themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDismissal {
    pub delay: Duration,
}

impl AlertDismissal {
    /// Site-wide default.
    pub const DEFAULT: Self = Self {
        delay: Duration::from_secs(3),
    };
    /// The inbox keeps its notices up a little longer.
    pub const INBOX: Self = Self {
        delay: Duration::from_secs(4),
    };

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn is_due(&self, alert: &Alert, now: Instant) -> bool {
        alert.visible && now.saturating_duration_since(alert.shown_at) >= self.delay
    }

    /// Close every due alert. Returns the IDs that were closed.
    pub fn sweep(&self, alerts: &mut [Alert], now: Instant) -> Vec<String> {
        alerts
            .iter_mut()
            .filter(|alert| self.is_due(alert, now))
            .map(|alert| {
                alert.visible = false;
                alert.id.clone()
            })
            .collect()
    }

    /// A page restored from the back/forward cache restarts the countdown for
    /// alerts still on screen. Returns how many were rescheduled.
    pub fn on_page_show(&self, persisted: bool, alerts: &mut [Alert], now: Instant) -> usize {
        if !persisted {
            return 0;
        }
        let mut restarted = 0;
        for alert in alerts.iter_mut().filter(|a| a.visible) {
            alert.shown_at = now;
            restarted += 1;
        }
        restarted
    }
}
