//! Transient notifications shown over the chat view.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const MAX_NOTIFICATIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Info,
}

impl NotificationKind {
    pub fn title(self) -> &'static str {
        match self {
            NotificationKind::Error => "Error",
            NotificationKind::Info => "Info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub body: String,
    pub posted_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Notifications {
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn error(&mut self, body: impl Into<String>) {
        self.push_at(NotificationKind::Error, body.into(), Instant::now());
    }

    pub fn info(&mut self, body: impl Into<String>) {
        self.push_at(NotificationKind::Info, body.into(), Instant::now());
    }

    pub(crate) fn push_at(&mut self, kind: NotificationKind, body: String, posted_at: Instant) {
        self.items.push_back(Notification {
            kind,
            body,
            posted_at,
        });
        while self.items.len() > MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
    }

    /// Drop expired notifications. Returns true when anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items
            .retain(|item| now.saturating_duration_since(item.posted_at) < ttl);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
