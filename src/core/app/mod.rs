use std::time::Duration;

use crate::api::{short_id, Thread};
use crate::core::location::Location;
use crate::core::notifications::Notifications;
use crate::core::transcript::Transcript;

pub mod actions;
pub mod ui_state;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use ui_state::{DeletePrompt, UiFocus, UiState};

/// View model for the interactive client. Only the UI task mutates it, and
/// only through [`apply_actions`].
pub struct App {
    pub threads: Vec<Thread>,
    pub selected_thread_id: Option<String>,
    pub transcript: Transcript,
    pub location: Location,
    pub notifications: Notifications,
    pub threads_loading: bool,
    pub messages_loading: bool,
    pub is_sending: bool,
    pub user_id: Option<String>,
    pub api_base_url: String,
    pub ui: UiState,
    thread_generation: u64,
    message_generation: u64,
}

impl App {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            threads: Vec::new(),
            selected_thread_id: None,
            transcript: Transcript::new(),
            location: Location::default(),
            notifications: Notifications::new(notification_ttl),
            threads_loading: false,
            messages_loading: false,
            is_sending: false,
            user_id: None,
            api_base_url: String::new(),
            ui: UiState::new(),
            thread_generation: 0,
            message_generation: 0,
        }
    }

    /// Start from `location`, preselecting the thread it names.
    pub fn with_location(mut self, location: Location) -> Self {
        self.selected_thread_id = location.thread_id();
        self.location = location;
        self
    }

    pub fn selected_thread(&self) -> Option<&Thread> {
        let id = self.selected_thread_id.as_deref()?;
        self.threads.iter().find(|thread| thread.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_thread_id.as_deref()?;
        self.threads.iter().position(|thread| thread.id == id)
    }

    /// Header title: the selected thread's own title, "Chat" when it has none
    /// (or the list does not know the id), or a prompt when nothing is selected.
    pub fn header_title(&self) -> String {
        if self.selected_thread_id.is_none() {
            return "Select a thread".to_string();
        }
        self.selected_thread()
            .and_then(|thread| thread.title.as_deref())
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or("Chat")
            .to_string()
    }

    pub fn header_subtitle(&self) -> Option<String> {
        self.selected_thread_id
            .as_deref()
            .map(|id| format!("Thread ID: {}...", short_id(id)))
    }

    pub(crate) fn next_thread_generation(&mut self) -> u64 {
        self.thread_generation += 1;
        self.thread_generation
    }

    pub(crate) fn next_message_generation(&mut self) -> u64 {
        self.message_generation += 1;
        self.message_generation
    }

    pub fn is_current_thread_load(&self, generation: u64) -> bool {
        self.thread_generation == generation
    }

    pub fn is_current_message_load(&self, generation: u64) -> bool {
        self.message_generation == generation
    }

    /// Keep the sidebar cursor on a real row after the list changed.
    pub(crate) fn clamp_sidebar_cursor(&mut self) {
        if self.threads.is_empty() {
            self.ui.sidebar_cursor = 0;
        } else if self.ui.sidebar_cursor >= self.threads.len() {
            self.ui.sidebar_cursor = self.threads.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests;
