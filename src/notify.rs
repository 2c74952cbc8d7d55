//! Notifications
//!
//! Transient, non-blocking messages shown on top of the page. Every
//! notification carries its own dismiss horizon; whoever renders them
//! schedules the matching [`Notifications::dismiss`] call.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

impl NotificationKind {
    /// Icon and alert class used by the page
    pub fn presentation(self) -> (&'static str, &'static str) {
        match self {
            NotificationKind::Error => ("bi-exclamation-triangle", "alert-danger"),
            NotificationKind::Success => ("bi-check-circle", "alert-success"),
            NotificationKind::Info => ("bi-info-circle", "alert-info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub dismiss_after: Duration,
}

/// Currently visible notifications, oldest first
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    active: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification and return it so the caller can schedule dismissal
    pub fn push(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        dismiss_after: Duration,
    ) -> Notification {
        let notification = Notification {
            id: NotificationId(self.next_id),
            kind,
            message: message.into(),
            dismiss_after,
        };
        self.next_id += 1;
        self.active.push(notification.clone());
        notification
    }

    /// Remove a notification. Dismissing twice is a no-op.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
