//! User-facing notifications (the blocking alert of the page).

use std::io::Write;
use std::sync::Mutex;

/// Shows a message to the user.
pub trait Notifier: Send + Sync {
    /// Show `message` and return once it has been presented.
    fn alert(&self, message: &str);
}

/// Writes alerts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if stderr itself is gone.
        let _ = writeln!(stderr, "[alert] {message}");
    }
}

/// Keeps every alert in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts shown so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        tracing::debug!(alert = message, "Alert recorded");
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.to_string());
    }
}
