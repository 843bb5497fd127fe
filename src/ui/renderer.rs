use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::api::{Message, Role};
use crate::core::app::{App, UiFocus};
use crate::core::transcript::EntryState;
use crate::ui::layout::{clamp_u16, truncate_to_width, wrap_text};
use crate::ui::theme::Theme;

const SIDEBAR_WIDTH: u16 = 32;
const NOTIFICATION_WIDTH: u16 = 48;
const MESSAGE_INDENT: &str = "  ";

pub fn ui(f: &mut Frame, app: &App) {
    let theme = Theme::default();
    let area = f.area();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH.min(area.width / 2)),
            Constraint::Min(0),
        ])
        .split(area);

    render_sidebar(f, app, &theme, columns[0]);
    render_main(f, app, &theme, columns[1]);
    render_notifications(f, app, &theme, area);
    if app.ui.delete_prompt.is_some() {
        render_delete_prompt(f, app, &theme, area);
    }
}

fn render_sidebar(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focused = app.ui.focus == UiFocus::Sidebar;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style
        } else {
            theme.border_style
        })
        .title(Span::styled(" Threads ", theme.title_style))
        .title_bottom(Line::from(Span::styled(
            " n: New Thread ",
            theme.subtitle_style,
        )));
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = sidebar_lines(app, theme, inner_width);
    let inner_height = area.height.saturating_sub(2) as usize;

    // Keep the cursor row on screen.
    let offset = app.ui.sidebar_cursor.saturating_sub(inner_height.saturating_sub(1));
    let paragraph = Paragraph::new(lines).block(block).scroll((clamp_u16(offset), 0));
    f.render_widget(paragraph, area);
}

pub(crate) fn sidebar_lines(app: &App, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    if app.threads.is_empty() {
        let message = if app.threads_loading {
            vec!["Loading threads..."]
        } else {
            vec!["No threads yet.", "Create a new one to get started!"]
        };
        return message
            .into_iter()
            .map(|text| Line::from(Span::styled(text.to_string(), theme.placeholder_style)))
            .collect();
    }

    let sidebar_focused = app.ui.focus == UiFocus::Sidebar;
    app.threads
        .iter()
        .enumerate()
        .map(|(index, thread)| {
            let selected = app.selected_thread_id.as_deref() == Some(thread.id.as_str());
            let marker = if selected { "▸ " } else { "  " };
            let title = truncate_to_width(&thread.display_title(), width.saturating_sub(2));
            let mut style = if selected {
                theme.selected_thread_style
            } else {
                theme.thread_style
            };
            if sidebar_focused && index == app.ui.sidebar_cursor {
                style = style.patch(theme.cursor_thread_style);
            }
            Line::from(Span::styled(format!("{marker}{title}"), style))
        })
        .collect()
}

fn render_main(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let show_input = app.selected_thread_id.is_some();
    let input_height = if show_input {
        app.ui.input_area_height()
    } else {
        0
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, theme, rows[0]);
    render_messages(f, app, theme, rows[1]);
    if show_input {
        render_input(f, app, theme, rows[2]);
    }
    render_status(f, app, theme, rows[3]);
}

fn render_header(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let width = area.width.saturating_sub(1) as usize;
    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&app.header_title(), width),
        theme.title_style,
    ))];
    if let Some(subtitle) = app.header_subtitle() {
        lines.push(Line::from(Span::styled(subtitle, theme.subtitle_style)));
    }
    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border_style),
    );
    f.render_widget(header, area);
}

fn render_messages(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if app.messages_loading {
        render_centered(f, "Loading messages...", theme, area);
        return;
    }
    if app.transcript.is_empty() && !app.is_sending {
        render_centered(f, "Start a conversation by sending a message", theme, area);
        return;
    }

    let width = area.width.saturating_sub(1) as usize;
    let lines = build_message_lines(app, theme, width);
    let total = clamp_u16(lines.len());
    let max_offset = total.saturating_sub(area.height);
    let offset = max_offset.saturating_sub(app.ui.scroll_from_bottom);
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn render_centered(f: &mut Frame, text: &str, theme: &Theme, area: Rect) {
    let top = area.height / 2;
    let target = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top),
        ..area
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        theme.placeholder_style,
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, target);
}

/// Flatten the visible transcript into pre-wrapped display lines.
pub(crate) fn build_message_lines(app: &App, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(MESSAGE_INDENT.len()).max(1);
    let mut lines = Vec::new();

    for entry in app.transcript.visible_entries() {
        let message = &entry.message;
        let pending = entry.state == EntryState::Pending;
        lines.push(message_heading(message, pending, theme));
        let text_style = if pending {
            theme.pending_text_style
        } else if message.role.is_user() {
            theme.user_text_style
        } else {
            theme.assistant_text_style
        };
        for line in wrap_text(&message.content, content_width) {
            lines.push(Line::from(Span::styled(
                format!("{MESSAGE_INDENT}{line}"),
                text_style,
            )));
        }
        lines.push(Line::default());
    }

    if app.is_sending {
        lines.push(Line::from(vec![
            Span::styled("Assistant ", theme.assistant_prefix_style),
            Span::styled(typing_dots(app), theme.typing_indicator_style),
        ]));
    }

    lines
}

fn message_heading(message: &Message, pending: bool, theme: &Theme) -> Line<'static> {
    let (label, style) = match message.role {
        Role::User => ("You", theme.user_prefix_style),
        Role::Assistant => ("Assistant", theme.assistant_prefix_style),
    };
    let stamp = if pending {
        "sending...".to_string()
    } else {
        message
            .created_at
            .map(|at| at.with_timezone(&Local).format("%H:%M").to_string())
            .unwrap_or_default()
    };

    let mut spans = vec![Span::styled(label.to_string(), style)];
    if !stamp.is_empty() {
        spans.push(Span::styled(format!(" · {stamp}"), theme.timestamp_style));
    }
    Line::from(spans)
}

fn typing_dots(app: &App) -> String {
    let frame = (app.ui.pulse_start.elapsed().as_millis() / 300 % 3) as usize;
    (0..3)
        .map(|i| if i == frame { '●' } else { '○' })
        .collect()
}

fn render_input(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focused = app.ui.is_input_focused();
    let title = if app.is_sending {
        " Message (waiting for reply) "
    } else {
        " Message "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style
        } else {
            theme.border_style
        })
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(app.ui.textarea(), inner);
}

fn render_status(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let text = match &app.ui.status {
        Some(status) => Span::styled(status.clone(), theme.status_style),
        None => Span::styled(
            "Tab: switch pane • /help: commands • Ctrl+C: quit".to_string(),
            theme.subtitle_style,
        ),
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}

fn render_notifications(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let width = NOTIFICATION_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(2) as usize;
    let mut y = area.y;

    for notification in app.notifications.iter() {
        let style = match notification.kind {
            crate::core::notifications::NotificationKind::Error => theme.error_style,
            crate::core::notifications::NotificationKind::Info => theme.info_style,
        };
        let body: Vec<Line> = wrap_text(&notification.body, inner_width)
            .into_iter()
            .map(Line::from)
            .collect();
        let height = clamp_u16(body.len())
            .saturating_add(2)
            .min(area.bottom().saturating_sub(y));
        if height < 3 {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width),
            y,
            width,
            height,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(Span::styled(format!(" {} ", notification.kind.title()), style));
        f.render_widget(Clear, rect);
        f.render_widget(Paragraph::new(body).block(block), rect);
        y += height;
    }
}

fn render_delete_prompt(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(prompt) = &app.ui.delete_prompt else {
        return;
    };
    let width = 60.min(area.width);
    let inner_width = width.saturating_sub(2) as usize;

    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&prompt.title, inner_width),
        theme.title_style,
    ))];
    lines.push(Line::default());
    for line in wrap_text(
        "Are you sure you want to delete this thread? This action cannot be undone \
         and all messages in this thread will be permanently deleted.",
        inner_width,
    ) {
        lines.push(Line::from(line));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "y/Enter: Delete • any other key: Cancel",
        theme.subtitle_style,
    )));

    let height = clamp_u16(lines.len()).saturating_add(2).min(area.height);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error_style)
        .title(Span::styled(" Delete Thread ", theme.error_style));
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
