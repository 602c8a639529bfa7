//! Transient in-app notifications
//!
//! Notifications dismiss themselves after a fixed lifetime (3 seconds by
//! default) and never block the caller.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Notification kind
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => f.write_str("success"),
            NotificationKind::Error => f.write_str("error"),
        }
    }
}

/// A message shown until it expires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Queue of active notifications
#[derive(Debug, Clone)]
pub struct Notifier {
    dismiss_after: Duration,
    items: Vec<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            items: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Error, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match kind {
            NotificationKind::Success => tracing::info!("Notification: {}", message),
            NotificationKind::Error => tracing::warn!("Notification: {}", message),
        }
        self.items.push(Notification {
            kind,
            message,
            expires_at: now + self.dismiss_after,
        });
    }

    /// Drop expired notifications and return the rest
    pub fn active_at(&mut self, now: Instant) -> &[Notification] {
        self.items.retain(|n| !n.is_expired(now));
        &self.items
    }

    pub fn active(&mut self) -> &[Notification] {
        self.active_at(Instant::now())
    }
}
