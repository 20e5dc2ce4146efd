//! Notification queue
//!
//! Transient user-facing messages produced by gateway responses. The queue
//! is bounded; when full the oldest entry is dropped. Entries leave the
//! queue by explicit dismissal (by position) or when their display time
//! has elapsed.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// A single transient message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    /// Create notification
    #[inline]
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Success notification
    #[inline]
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    /// Error notification
    #[inline]
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    notification: Notification,
    posted_at: Instant,
    shown: bool,
}

/// Bounded FIFO of notifications with auto-close
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: VecDeque<Entry>,
    capacity: usize,
    auto_close: Duration,
}

impl NotificationQueue {
    /// Queue holding at most `capacity` entries, each for `auto_close`
    #[must_use]
    pub fn new(capacity: usize, auto_close: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            auto_close,
        }
    }

    /// Append, evicting the oldest entry when full
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    /// Append with an explicit posting time
    pub fn push_at(&mut self, notification: Notification, posted_at: Instant) {
        if self.entries.len() == self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::warn!(
                    title = %evicted.notification.title,
                    "notification queue full, dropping oldest"
                );
            }
        }
        self.entries.push_back(Entry {
            notification,
            posted_at,
            shown: false,
        });
    }

    /// Dismiss the entry at `index`
    pub fn remove(&mut self, index: usize) -> Option<Notification> {
        self.entries.remove(index).map(|e| e.notification)
    }

    /// Drop entries whose display time elapsed by `now`
    pub fn expire(&mut self, now: Instant) -> Vec<Notification> {
        let auto_close = self.auto_close;
        let mut expired = Vec::new();
        self.entries.retain(|e| {
            let keep = now.saturating_duration_since(e.posted_at) < auto_close;
            if !keep {
                expired.push(e.notification.clone());
            }
            keep
        });
        expired
    }

    /// Entries not handed out before, marking them shown
    pub fn take_unshown(&mut self) -> Vec<Notification> {
        self.entries
            .iter_mut()
            .filter(|e| !e.shown)
            .map(|e| {
                e.shown = true;
                e.notification.clone()
            })
            .collect()
    }

    /// Current entries in posting order
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|e| &e.notification)
    }

    /// Entry at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Notification> {
        self.entries.get(index).map(|e| &e.notification)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
