use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_prefix_style: Style,
    pub assistant_text_style: Style,
    pub pending_text_style: Style,
    pub timestamp_style: Style,
    pub placeholder_style: Style,

    // Chrome
    pub title_style: Style,
    pub subtitle_style: Style,
    pub typing_indicator_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub status_style: Style,

    // Sidebar
    pub thread_style: Style,
    pub selected_thread_style: Style,
    pub cursor_thread_style: Style,

    // Overlays
    pub error_style: Style,
    pub info_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::White),
            pending_text_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::DIM),
            timestamp_style: Style::default().fg(Color::DarkGray),
            placeholder_style: Style::default().fg(Color::DarkGray),

            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::DarkGray),
            typing_indicator_style: Style::default().fg(Color::Magenta),
            border_style: Style::default().fg(Color::DarkGray),
            focused_border_style: Style::default().fg(Color::Cyan),
            status_style: Style::default().fg(Color::Yellow),

            thread_style: Style::default().fg(Color::Gray),
            selected_thread_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            cursor_thread_style: Style::default().add_modifier(Modifier::REVERSED),

            error_style: Style::default().fg(Color::Red),
            info_style: Style::default().fg(Color::Cyan),
        }
    }
}
