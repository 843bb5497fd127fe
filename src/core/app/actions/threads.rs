use tracing::{debug, info, warn};

use super::{messages, App, AppAction, AppCommand};
use crate::core::app::DeletePrompt;
use crate::core::location::Location;

pub(super) fn handle_thread_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::RefreshThreads => Some(start_thread_load(app)),
        AppAction::ThreadsLoaded { generation, result } => {
            if !app.is_current_thread_load(generation) {
                debug!(generation, "Dropping stale thread list");
                return None;
            }
            app.threads_loading = false;
            match result {
                Ok(threads) => apply_thread_list(app, threads),
                Err(message) => {
                    warn!(error = %message, "Failed to load threads");
                    app.notifications.error(message);
                    None
                }
            }
        }
        AppAction::CreateThread { title } => {
            let title = title
                .map(|title| title.trim().to_string())
                .filter(|title| !title.is_empty());
            app.ui.set_status("Creating thread...");
            Some(AppCommand::CreateThread { title })
        }
        AppAction::ThreadCreated { result } => {
            app.ui.clear_status();
            match result {
                Ok(thread) => {
                    info!(thread_id = %thread.id, "Created thread");
                    let thread_id = thread.id.clone();
                    // A list requested before the create would not contain it.
                    app.next_thread_generation();
                    app.threads_loading = false;
                    app.threads.insert(0, thread);
                    app.ui.sidebar_cursor = 0;
                    app.ui.focus_input();
                    Some(select_thread(app, &thread_id))
                }
                Err(message) => {
                    warn!(error = %message, "Failed to create thread");
                    app.notifications.error(message);
                    None
                }
            }
        }
        AppAction::SelectThread { thread_id } => Some(select_thread(app, &thread_id)),
        AppAction::OpenLink { link } => match Location::parse(&link) {
            Ok(location) => match location.thread_id() {
                Some(thread_id) => Some(select_thread(app, &thread_id)),
                None => {
                    app.ui.set_status("That link does not name a thread");
                    None
                }
            },
            Err(message) => {
                app.notifications.error(message);
                None
            }
        },
        AppAction::RequestDeleteThread { thread_id } => {
            match app.threads.iter().find(|thread| thread.id == thread_id) {
                Some(thread) => {
                    app.ui.delete_prompt = Some(DeletePrompt {
                        title: thread.display_title(),
                        thread_id,
                    });
                }
                None => app.ui.set_status("No such thread"),
            }
            None
        }
        AppAction::ConfirmDelete => app
            .ui
            .delete_prompt
            .take()
            .map(|prompt| AppCommand::DeleteThread {
                thread_id: prompt.thread_id,
            }),
        AppAction::CancelDelete => {
            app.ui.delete_prompt = None;
            None
        }
        AppAction::ThreadDeleted { thread_id, result } => match result {
            Ok(true) => remove_thread(app, &thread_id),
            Ok(false) => {
                warn!(%thread_id, "Server refused to delete thread");
                app.notifications.error("Failed to delete thread");
                None
            }
            Err(message) => {
                warn!(%thread_id, error = %message, "Failed to delete thread");
                app.notifications.error(message);
                None
            }
        },
        _ => unreachable!("non-thread action routed to thread handler"),
    }
}

pub(super) fn start_thread_load(app: &mut App) -> AppCommand {
    app.threads_loading = true;
    AppCommand::LoadThreads {
        generation: app.next_thread_generation(),
    }
}

/// Select `thread_id`, record it in the location, and load its messages.
pub(super) fn select_thread(app: &mut App, thread_id: &str) -> AppCommand {
    debug!(%thread_id, "Selecting thread");
    app.selected_thread_id = Some(thread_id.to_string());
    app.location.push_thread(thread_id);
    if let Some(index) = app.selected_index() {
        app.ui.sidebar_cursor = index;
    }
    app.transcript.clear();
    app.ui.scroll_to_bottom();
    messages::start_message_load(app, thread_id)
}

fn apply_thread_list(app: &mut App, threads: Vec<crate::api::Thread>) -> Option<AppCommand> {
    debug!(count = threads.len(), "Thread list loaded");
    app.threads = threads;
    app.clamp_sidebar_cursor();

    let linked = app
        .location
        .thread_id()
        .filter(|id| app.threads.iter().any(|thread| &thread.id == id));

    if let Some(thread_id) = linked {
        if app.selected_thread_id.as_deref() == Some(thread_id.as_str()) {
            if let Some(index) = app.selected_index() {
                app.ui.sidebar_cursor = index;
            }
            return None;
        }
        app.selected_thread_id = Some(thread_id.clone());
        if let Some(index) = app.selected_index() {
            app.ui.sidebar_cursor = index;
        }
        app.transcript.clear();
        return Some(messages::start_message_load(app, &thread_id));
    }

    if app.selected_index().is_some() {
        return None;
    }

    // The link or selection names a thread the server no longer lists.
    if app.selected_thread_id.take().is_some() {
        app.transcript.clear();
        messages::abandon_message_load(app);
    }
    match app.threads.first().map(|thread| thread.id.clone()) {
        Some(first) => Some(select_thread(app, &first)),
        None => {
            if app.location.thread_id().is_some() {
                app.location.clear_thread();
            }
            None
        }
    }
}

fn remove_thread(app: &mut App, thread_id: &str) -> Option<AppCommand> {
    info!(%thread_id, "Deleted thread");
    app.threads.retain(|thread| thread.id != thread_id);
    app.clamp_sidebar_cursor();

    if app.selected_thread_id.as_deref() != Some(thread_id) {
        return None;
    }

    app.selected_thread_id = None;
    app.transcript.clear();
    app.location.clear_thread();
    messages::abandon_message_load(app);

    let first = app.threads.first().map(|thread| thread.id.clone())?;
    Some(select_thread(app, &first))
}
