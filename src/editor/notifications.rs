//! Transient user-facing messages (success and error toasts).

use bevy::prelude::*;
use std::fmt::Display;

use crate::constants::NOTIFICATION_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    /// Seconds left before the notification is dropped
    pub remaining: f32,
}

#[derive(Resource, Default)]
pub struct Notifications {
    pub items: Vec<Notification>,
}

impl Notifications {
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NotificationKind::Success, text.into());
    }

    /// Log and show an error.
    pub fn error(&mut self, context: &str, err: impl Display) {
        let text = format!("{}: {}", context, err);
        error!("{}", text);
        self.push(NotificationKind::Error, text);
    }

    fn push(&mut self, kind: NotificationKind, text: String) {
        self.items.push(Notification {
            kind,
            text,
            remaining: NOTIFICATION_SECONDS,
        });
    }

    pub fn tick(&mut self, delta: f32) {
        for item in &mut self.items {
            item.remaining -= delta;
        }
        self.items.retain(|n| n.remaining > 0.0);
    }
}

pub fn expire_notifications(time: Res<Time>, mut notifications: ResMut<Notifications>) {
    if !notifications.items.is_empty() {
        notifications.tick(time.delta_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_expire() {
        let mut notifications = Notifications::default();
        notifications.success("Saved");
        notifications.tick(NOTIFICATION_SECONDS / 2.0);
        assert_eq!(notifications.items.len(), 1);
        notifications.tick(NOTIFICATION_SECONDS);
        assert!(notifications.items.is_empty());
    }

    #[test]
    fn test_error_includes_context() {
        let mut notifications = Notifications::default();
        notifications.error("Could not load image", "unsupported format");
        assert_eq!(notifications.items[0].kind, NotificationKind::Error);
        assert_eq!(notifications.items[0].text, "Could not load image: unsupported format");
    }
}
