use std::time::Instant;

use tracing::{debug, warn};

use super::{threads, App, AppAction, AppCommand};

pub(super) fn handle_message_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SendMessage { content } => send_message(app, &content),
        AppAction::MessageSent { pending, result } => {
            app.is_sending = false;
            match result {
                Ok(reply) => {
                    if !app
                        .transcript
                        .commit(&pending.local_id, reply.message, reply.response)
                    {
                        debug!(
                            thread_id = %pending.thread_id,
                            "Send resolved after its thread was reloaded"
                        );
                    }
                    app.ui.scroll_to_bottom();
                    app.ui.focus_input();
                    // Titles and ordering may have changed server-side.
                    Some(threads::start_thread_load(app))
                }
                Err(message) => {
                    app.transcript.roll_back(&pending.local_id);
                    warn!(thread_id = %pending.thread_id, error = %message, "Failed to send message");
                    app.notifications.error(message);
                    None
                }
            }
        }
        AppAction::ReloadMessages => {
            let thread_id = app.selected_thread_id.clone()?;
            Some(start_message_load(app, &thread_id))
        }
        AppAction::MessagesLoaded {
            thread_id,
            generation,
            result,
        } => {
            if !app.is_current_message_load(generation) {
                debug!(%thread_id, generation, "Dropping stale message list");
                return None;
            }
            app.messages_loading = false;
            match result {
                Ok(messages) => {
                    debug!(%thread_id, count = messages.len(), "Messages loaded");
                    app.transcript.replace(messages);
                    app.ui.scroll_to_bottom();
                }
                Err(message) => {
                    warn!(%thread_id, error = %message, "Failed to load messages");
                    app.notifications.error(message);
                }
            }
            None
        }
        _ => unreachable!("non-message action routed to message handler"),
    }
}

/// Start an optimistic send to the selected thread. Returns `None` when the
/// content is blank, nothing is selected, or a send is already in flight.
pub(super) fn send_message(app: &mut App, content: &str) -> Option<AppCommand> {
    if content.trim().is_empty() {
        return None;
    }
    if app.is_sending {
        app.ui.set_status("Still waiting for the last reply");
        return None;
    }
    let thread_id = match app.selected_thread_id.clone() {
        Some(id) => id,
        None => {
            app.ui.set_status("Select or create a thread first");
            return None;
        }
    };

    let pending = app.transcript.begin_send(&thread_id, content)?;
    app.is_sending = true;
    app.ui.pulse_start = Instant::now();
    app.ui.scroll_to_bottom();
    Some(AppCommand::SendMessage { pending })
}

pub(super) fn start_message_load(app: &mut App, thread_id: &str) -> AppCommand {
    app.messages_loading = true;
    AppCommand::LoadMessages {
        thread_id: thread_id.to_string(),
        generation: app.next_message_generation(),
    }
}

/// Invalidate any in-flight message load without starting a new one.
pub(super) fn abandon_message_load(app: &mut App) {
    app.next_message_generation();
    app.messages_loading = false;
}
