//! Message log for the selected thread with optimistic sends.
//!
//! The log is append-only between thread loads. A send appends a `Pending`
//! entry holding a locally minted message; when the request resolves that
//! entry moves to `Committed` (and the server's user message and reply are
//! appended) or to `RolledBack`. Resolved optimistic entries stay in the log
//! but are never shown, so the visible list after a send is always either
//! "before + confirmed user message + reply" or exactly "before".

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::api::{Message, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Authoritative message received from the server.
    Confirmed,
    /// Optimistic message waiting for the send to resolve.
    Pending,
    /// Optimistic message superseded by the server's copy.
    Committed,
    /// Optimistic message whose send failed.
    RolledBack,
}

impl EntryState {
    pub fn is_visible(self) -> bool {
        matches!(self, EntryState::Confirmed | EntryState::Pending)
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub message: Message,
    pub state: EntryState,
}

/// Handle for an in-flight optimistic send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub local_id: String,
    pub thread_id: String,
    pub content: String,
}

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Ids for optimistic messages: `temp-<unix millis>-<sequence>`.
pub fn next_temp_id() -> String {
    let seq = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("temp-{}-{seq}", Utc::now().timestamp_millis())
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the log to the server's list for a freshly loaded thread.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.entries = messages
            .into_iter()
            .map(|message| Entry {
                message,
                state: EntryState::Confirmed,
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append an optimistic user message. Blank content yields `None` and
    /// leaves the log untouched.
    pub fn begin_send(&mut self, thread_id: &str, content: &str) -> Option<PendingSend> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        let pending = PendingSend {
            local_id: next_temp_id(),
            thread_id: thread_id.to_string(),
            content: content.to_string(),
        };
        self.entries.push(Entry {
            message: Message {
                id: pending.local_id.clone(),
                thread_id: pending.thread_id.clone(),
                role: Role::User,
                content: pending.content.clone(),
                created_at: None,
            },
            state: EntryState::Pending,
        });
        Some(pending)
    }

    /// Settle a pending send with the server's pair. Returns `false` (and
    /// appends nothing) when `local_id` is not pending in this log, which
    /// happens after the thread was reloaded or switched mid-send.
    pub fn commit(&mut self, local_id: &str, user: Message, reply: Message) -> bool {
        if !self.transition(local_id, EntryState::Committed) {
            return false;
        }
        for message in [user, reply] {
            self.entries.push(Entry {
                message,
                state: EntryState::Confirmed,
            });
        }
        true
    }

    /// Withdraw a pending send. Returns `false` when `local_id` is not pending.
    pub fn roll_back(&mut self, local_id: &str) -> bool {
        self.transition(local_id, EntryState::RolledBack)
    }

    fn transition(&mut self, local_id: &str, next: EntryState) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.state == EntryState::Pending && entry.message.id == local_id)
        {
            Some(entry) => {
                entry.state = next;
                true
            }
            None => false,
        }
    }

    /// Entries to display, in log order, with their state.
    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.state.is_visible())
    }

    /// Messages to display, in log order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.visible_entries().map(|entry| &entry.message)
    }

    pub fn visible_len(&self) -> usize {
        self.messages().count()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_len() == 0
    }

}
