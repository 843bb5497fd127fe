mod input;
mod messages;
mod threads;

use ratatui::prelude::Size;
use tokio::sync::mpsc;
use tracing::warn;

use super::App;
use crate::api::{Message, SendMessageResponse, Thread};
use crate::core::transcript::PendingSend;

pub enum AppAction {
    // Input
    SubmitInput,
    InsertIntoInput {
        text: String,
    },
    ClearInput,
    SetStatus {
        message: String,
    },
    ClearStatus,
    Notify {
        message: String,
    },
    Quit,

    // Threads
    RefreshThreads,
    ThreadsLoaded {
        generation: u64,
        result: Result<Vec<Thread>, String>,
    },
    CreateThread {
        title: Option<String>,
    },
    ThreadCreated {
        result: Result<Thread, String>,
    },
    SelectThread {
        thread_id: String,
    },
    OpenLink {
        link: String,
    },
    RequestDeleteThread {
        thread_id: String,
    },
    ConfirmDelete,
    CancelDelete,
    ThreadDeleted {
        thread_id: String,
        result: Result<bool, String>,
    },

    // Messages
    SendMessage {
        content: String,
    },
    MessageSent {
        pending: PendingSend,
        result: Result<SendMessageResponse, String>,
    },
    ReloadMessages,
    MessagesLoaded {
        thread_id: String,
        generation: u64,
        result: Result<Vec<Message>, String>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            if self
                .tx
                .send(AppActionEnvelope {
                    action,
                    context: ctx,
                })
                .is_err()
            {
                warn!("Action dispatched after the event loop stopped");
                return;
            }
        }
    }
}

/// Network work requested by the reducer. The event loop runs each command
/// on its own task and reports the outcome back as an [`AppAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    LoadThreads { generation: u64 },
    LoadMessages { thread_id: String, generation: u64 },
    CreateThread { title: Option<String> },
    DeleteThread { thread_id: String },
    SendMessage { pending: PendingSend },
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    if ctx.term_width > 0 && ctx.term_height > 0 {
        app.ui.last_term_size = Size::new(ctx.term_width, ctx.term_height);
    }

    match action {
        AppAction::SubmitInput
        | AppAction::InsertIntoInput { .. }
        | AppAction::ClearInput
        | AppAction::SetStatus { .. }
        | AppAction::ClearStatus
        | AppAction::Notify { .. }
        | AppAction::Quit => input::handle_input_action(app, action, ctx),

        AppAction::RefreshThreads
        | AppAction::ThreadsLoaded { .. }
        | AppAction::CreateThread { .. }
        | AppAction::ThreadCreated { .. }
        | AppAction::SelectThread { .. }
        | AppAction::OpenLink { .. }
        | AppAction::RequestDeleteThread { .. }
        | AppAction::ConfirmDelete
        | AppAction::CancelDelete
        | AppAction::ThreadDeleted { .. } => threads::handle_thread_action(app, action),

        AppAction::SendMessage { .. }
        | AppAction::MessageSent { .. }
        | AppAction::ReloadMessages
        | AppAction::MessagesLoaded { .. } => messages::handle_message_action(app, action),
    }
}
