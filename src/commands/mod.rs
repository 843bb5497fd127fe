mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::app::{App, AppAction};

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
    Dispatch(AppAction),
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, char::is_whitespace);
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        (command.handler)(app, CommandInvocation { args })
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from("Commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  {:<14} {}\n", command.usage, command.help));
    }
    help.push_str(
        "Keys: Enter send, Alt+Enter newline, Tab switch pane, \
         j/k or arrows move, Enter open, n new, d delete, Ctrl+C quit",
    );
    app.notifications.info(help);
    CommandResult::Continue
}

pub(super) fn handle_new(_app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let title = Some(invocation.args.to_string()).filter(|title| !title.is_empty());
    CommandResult::Dispatch(AppAction::CreateThread { title })
}

pub(super) fn handle_delete(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    match app.selected_thread_id.clone() {
        Some(thread_id) => CommandResult::Dispatch(AppAction::RequestDeleteThread { thread_id }),
        None => {
            app.ui.set_status("No thread selected");
            CommandResult::Continue
        }
    }
}

pub(super) fn handle_threads(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Dispatch(AppAction::RefreshThreads)
}

pub(super) fn handle_refresh(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    if app.selected_thread_id.is_none() {
        app.ui.set_status("No thread selected");
        return CommandResult::Continue;
    }
    CommandResult::Dispatch(AppAction::ReloadMessages)
}

pub(super) fn handle_link(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        let href = app.location.href();
        app.ui.set_status(format!("Link: {href}"));
        return CommandResult::Continue;
    }
    CommandResult::Dispatch(AppAction::OpenLink {
        link: invocation.args.to_string(),
    })
}

pub(super) fn handle_whoami(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let message = match &app.user_id {
        Some(user_id) => format!("Anonymous user {user_id} @ {}", app.api_base_url),
        None => "No user ID set".to_string(),
    };
    app.ui.set_status(message);
    CommandResult::Continue
}

pub(super) fn handle_quit(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Dispatch(AppAction::Quit)
}
