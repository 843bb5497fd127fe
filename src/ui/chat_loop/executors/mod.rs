//! Runs [`AppCommand`]s against the chat backend on background tasks.

use std::sync::Arc;

use tracing::debug;

use crate::api::ChatApi;
use crate::core::app::{AppAction, AppActionContext, AppActionDispatcher, AppCommand};

pub(super) fn spawn_command(
    api: Arc<dyn ChatApi>,
    dispatcher: AppActionDispatcher,
    command: AppCommand,
) {
    tokio::spawn(async move {
        let action = execute_command(api.as_ref(), command).await;
        dispatcher.dispatch_many([action], AppActionContext::default());
    });
}

/// Perform one command and describe its outcome as an action.
pub(super) async fn execute_command(api: &dyn ChatApi, command: AppCommand) -> AppAction {
    match command {
        AppCommand::LoadThreads { generation } => {
            debug!(generation, "Loading threads");
            AppAction::ThreadsLoaded {
                generation,
                result: api.list_threads().await.map_err(|e| e.to_string()),
            }
        }
        AppCommand::LoadMessages {
            thread_id,
            generation,
        } => {
            debug!(%thread_id, generation, "Loading messages");
            let result = api.list_messages(&thread_id).await.map_err(|e| e.to_string());
            AppAction::MessagesLoaded {
                thread_id,
                generation,
                result,
            }
        }
        AppCommand::CreateThread { title } => AppAction::ThreadCreated {
            result: api.create_thread(title).await.map_err(|e| e.to_string()),
        },
        AppCommand::DeleteThread { thread_id } => {
            let result = api.delete_thread(&thread_id).await.map_err(|e| e.to_string());
            AppAction::ThreadDeleted { thread_id, result }
        }
        AppCommand::SendMessage { pending } => {
            debug!(thread_id = %pending.thread_id, local_id = %pending.local_id, "Sending message");
            let result = api
                .send_message(&pending.thread_id, &pending.content)
                .await
                .map_err(|e| e.to_string());
            AppAction::MessageSent { pending, result }
        }
    }
}
