//! Event polling, dispatching, and UI rendering loop.
//!
//! The loop polls terminal input, turns keys into actions, applies queued
//! actions to the shared [`App`](crate::core::app::App), runs the resulting
//! network commands on Tokio tasks, and redraws at a bounded frame rate.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::Size;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::ChatApi;
use crate::core::app::{
    apply_actions, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
};
use crate::core::state_file::StateFile;
use crate::ui::renderer::ui;

use super::executors::spawn_command;
use super::keybindings::handle_key;
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::setup::{bootstrap_app, ChatSession};
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    app.read(|app| terminal_guard.draw(|f| ui(f, app)).map(|_| ()))
        .await?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

/// Returns true when any event was handled.
async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
    term_size: Size,
) -> bool {
    let ctx = AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    };
    let mut processed = false;

    while let Ok(ev) = event_rx.try_recv() {
        processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let actions = app
                    .update(|app| {
                        if term_size.height > 0 {
                            app.ui.last_term_size = term_size;
                        }
                        handle_key(app, key)
                    })
                    .await;
                dispatcher.dispatch_many(actions, ctx);
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                let text = sanitize_pasted_text(&text);
                if !text.is_empty() {
                    dispatcher.dispatch_many([AppAction::InsertIntoInput { text }], ctx);
                }
            }
            UiEvent::Crossterm(_) => {}
        }
    }

    processed
}

pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", "\n");
    let without_cr = without_crlf.replace('\r', "\n");
    let expanded_tabs = without_cr.replace('\t', "    ");
    expanded_tabs
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}

async fn drain_action_queue(
    app: &AppHandle,
    api: &Arc<dyn ChatApi>,
    dispatcher: &AppActionDispatcher,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    for command in commands {
        spawn_command(api.clone(), dispatcher.clone(), command);
    }
    true
}

/// Save the current link whenever it differs from the last one written.
fn remember_link(state_file: Option<&StateFile>, href: &str, last_saved: &mut String) {
    if href == last_saved.as_str() {
        return;
    }
    *last_saved = href.to_string();
    let Some(state_file) = state_file else {
        return;
    };
    if let Err(err) = state_file.update(|state| state.last_link = Some(href.to_string())) {
        warn!(error = %err, "Failed to remember thread link");
    }
}

fn spawn_event_reader(
    event_tx: mpsc::UnboundedSender<UiEvent>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while !cancel.is_cancelled() {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "Terminal event read failed");
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(session: ChatSession) -> Result<(), Box<dyn Error>> {
    let app = bootstrap_app(&session);
    let ChatSession {
        api, state_file, ..
    } = session;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let action_dispatcher = AppActionDispatcher::new(action_tx);
    // A linked thread loads right away, alongside the thread list.
    action_dispatcher.dispatch_many(
        [AppAction::ReloadMessages, AppAction::RefreshThreads],
        AppActionContext::default(),
    );

    let mut saved_link = app.read(|app| app.location.href()).await;
    info!(link = %saved_link, "Starting chat session");

    let terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let cancel = CancellationToken::new();
    let event_reader_handle = spawn_event_reader(event_tx, cancel.clone());

    const MAX_FPS: u64 = 30;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result: Result<(), Box<dyn Error>> = loop {
        if app.read(|app| app.ui.exit_requested).await {
            break Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break Err(err.into());
        }

        let term_size = current_terminal_size(&terminal).await;
        let events_processed =
            process_ui_events(&app, &mut event_rx, &action_dispatcher, term_size).await;
        let actions_applied =
            drain_action_queue(&app, &api, &action_dispatcher, &mut action_rx).await;

        let (href, animating, expired) = app
            .update(|app| {
                let now = Instant::now();
                let pruned = app.notifications.prune(now);
                let cleared = app.ui.expire_status(now);
                (app.location.href(), app.is_sending, pruned || cleared)
            })
            .await;
        remember_link(state_file.as_ref(), &href, &mut saved_link);

        if events_processed || actions_applied || animating || expired {
            request_redraw = true;
        }

        if !events_processed && !actions_applied {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    cancel.cancel();
    if let Err(err) = event_reader_handle.await {
        debug!(error = %err, "Event reader task ended abnormally");
    }
    restore_terminal(&terminal).await?;
    info!("Chat session ended");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn pasted_text_is_normalized() {
        assert_eq!(sanitize_pasted_text("a\r\nb\rc\td\u{7}"), "a\nb\nc    d");
    }

    #[test]
    fn remember_link_writes_only_changes() {
        let dir = TempDir::new().expect("temp dir");
        let file = StateFile::new(dir.path().join("state.toml"));
        let mut saved = "spur://chat/".to_string();

        remember_link(Some(&file), "spur://chat/", &mut saved);
        assert!(!file.path().exists());

        remember_link(Some(&file), "spur://chat/?thread=t1", &mut saved);
        assert_eq!(saved, "spur://chat/?thread=t1");
        assert_eq!(
            file.load().expect("load").last_link.as_deref(),
            Some("spur://chat/?thread=t1")
        );
    }

    #[test]
    fn remember_link_without_state_file_only_tracks() {
        let mut saved = String::new();
        remember_link(None, "spur://chat/?thread=t2", &mut saved);
        assert_eq!(saved, "spur://chat/?thread=t2");
    }
}
