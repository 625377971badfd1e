//! Transient status messages.
//!
//! A `Notifier` is either hidden or showing one message. Showing a message replaces whatever was
//! visible and schedules an automatic hide. The pending hide of the replaced message is aborted,
//! and a generation counter guards against a timer that already woke up, so an older timer can
//! never hide a newer message. Hiding is idempotent.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

serde_plain::derive_display_from_serialize!(Severity);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    message: String,
    severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Writes the notification to the log at a level matching its severity.
    pub fn print(&self) {
        match self.severity {
            Severity::Success => info!("{}", self.message),
            Severity::Error => error!("{}", self.message),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

#[derive(Debug, Default)]
struct Inner {
    current: Option<Notification>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// The notification area. Clones share the same state.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Arc<Mutex<Inner>>,
    timeout: Duration,
}

impl Notifier {
    /// Creates a hidden notifier whose messages hide themselves after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Notification::new(message, Severity::Success))
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Notification::new(message, Severity::Error))
    }

    /// Makes `notification` the visible one and restarts the auto-hide countdown.
    pub fn show(&self, notification: Notification) {
        trace!("Showing notification {notification}");
        let mut inner = self.lock();
        inner.current = Some(notification);
        inner.generation += 1;
        if let Some(previous) = inner.timer.take() {
            previous.abort();
        }

        // Outside a runtime there is nothing to drive the timer; the message stays until dismissed.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let timeout = self.timeout;
        inner.timer = Some(handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            let mut inner = shared.lock().unwrap_or_else(|e| e.into_inner());
            if inner.generation == generation {
                inner.current = None;
                inner.timer = None;
            }
        }));
    }

    /// Hides the visible notification, if any.
    pub fn dismiss(&self) {
        self.lock().current = None;
    }

    /// The visible notification.
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().current.is_some()
    }
}
