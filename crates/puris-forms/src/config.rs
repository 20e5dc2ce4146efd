//! Form layer configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings shared by every modal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Maximum queued notifications per modal
    pub notification_capacity: usize,
    /// Display time of a notification in milliseconds
    pub notification_auto_close_ms: u64,
}

impl FormsConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With notification capacity
    #[inline]
    #[must_use]
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity;
        self
    }

    /// With notification display time
    #[inline]
    #[must_use]
    pub fn with_auto_close(mut self, auto_close: Duration) -> Self {
        self.notification_auto_close_ms = u64::try_from(auto_close.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Notification display time
    #[inline]
    #[must_use]
    pub fn auto_close(&self) -> Duration {
        Duration::from_millis(self.notification_auto_close_ms)
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            notification_capacity: 8,
            notification_auto_close_ms: 6_000,
        }
    }
}
