//! User-visible feedback for draft actions

use chrono::{DateTime, Duration, Local};

/// Sink for success notifications raised by the draft manager
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify_success(&mut self, message: &str, title: &str);
}

/// A single notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub shown_at: DateTime<Local>,
}

impl Toast {
    /// Status bar text, e.g. "Draft Saved: Your projects draft has been saved. (14:03)"
    pub fn display(&self) -> String {
        format!(
            "{}: {} ({})",
            self.title,
            self.message,
            self.shown_at.format("%H:%M")
        )
    }
}

/// Notifier that keeps the latest toast for the status bar
#[derive(Debug, Clone)]
pub struct Toasts {
    latest: Option<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime_secs: u64) -> Self {
        Self {
            latest: None,
            lifetime: i64::try_from(lifetime_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.latest.as_ref()
    }

    /// Drop the current toast once it has been visible for its lifetime
    pub fn expire(&mut self, now: DateTime<Local>) {
        if let Some(ref toast) = self.latest {
            if now - toast.shown_at >= self.lifetime {
                self.latest = None;
            }
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Notifier for Toasts {
    fn notify_success(&mut self, message: &str, title: &str) {
        tracing::debug!(title, message, "notification");
        self.latest = Some(Toast {
            title: title.to_string(),
            message: message.to_string(),
            shown_at: Local::now(),
        });
    }
}
