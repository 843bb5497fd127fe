use std::time::{Duration, Instant};

use ratatui::prelude::Size;
use tui_textarea::TextArea;

/// How long a status line stays up before it clears itself.
pub const STATUS_TTL: Duration = Duration::from_secs(10);

/// Scroll step used before the first terminal size is known.
const DEFAULT_PAGE_LINES: u16 = 10;

/// Which UI pane currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiFocus {
    /// Thread list has focus (for navigation and thread actions).
    Sidebar,

    /// Input area has focus (for typing).
    Input,
}

/// A delete waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub thread_id: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct UiState {
    textarea: TextArea<'static>,
    pub focus: UiFocus,
    /// Highlighted row in the thread list.
    pub sidebar_cursor: usize,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_from_bottom: u16,
    pub status: Option<String>,
    pub status_set_at: Option<Instant>,
    pub delete_prompt: Option<DeletePrompt>,
    pub exit_requested: bool,
    pub last_term_size: Size,
    pub pulse_start: Instant,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        let mut ui = Self {
            textarea: TextArea::default(),
            focus: UiFocus::Input,
            sidebar_cursor: 0,
            scroll_from_bottom: 0,
            status: None,
            status_set_at: None,
            delete_prompt: None,
            exit_requested: false,
            last_term_size: Size::default(),
            pulse_start: Instant::now(),
        };
        ui.configure_textarea();
        ui
    }

    fn configure_textarea(&mut self) {
        self.textarea
            .set_placeholder_text("Type your message... (Enter to send, Alt+Enter for newline)");
        self.textarea
            .set_cursor_line_style(ratatui::style::Style::default());
    }

    pub fn focus_input(&mut self) {
        self.focus = UiFocus::Input;
    }

    pub fn focus_sidebar(&mut self) {
        self.focus = UiFocus::Sidebar;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            UiFocus::Input => UiFocus::Sidebar,
            UiFocus::Sidebar => UiFocus::Input,
        };
    }

    pub fn is_input_focused(&self) -> bool {
        self.focus == UiFocus::Input
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn get_input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        self.textarea = TextArea::from(lines);
        self.textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
        self.configure_textarea();
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.configure_textarea();
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    /// Rows the input box needs, capped so the transcript keeps most of the screen.
    pub fn input_area_height(&self) -> u16 {
        let lines = self.textarea.lines().len().clamp(1, 6) as u16;
        lines + 2
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_set_at = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_set_at = None;
    }

    /// Clear a status line older than [`STATUS_TTL`]. Returns true when one
    /// was removed.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match self.status_set_at {
            Some(set_at) if now.saturating_duration_since(set_at) >= STATUS_TTL => {
                self.clear_status();
                true
            }
            _ => false,
        }
    }

    /// Lines moved by PageUp/PageDown: half the last known terminal height.
    pub fn page_lines(&self) -> u16 {
        match self.last_term_size.height {
            0 => DEFAULT_PAGE_LINES,
            height => (height / 2).max(1),
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }
}
