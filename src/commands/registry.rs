use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    /// Text after the command name, trimmed.
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands and keys.",
        handler: super::handle_help,
    },
    Command {
        name: "new",
        usage: "/new [title]",
        help: "Create a thread and switch to it.",
        handler: super::handle_new,
    },
    Command {
        name: "delete",
        usage: "/delete",
        help: "Delete the selected thread (asks first).",
        handler: super::handle_delete,
    },
    Command {
        name: "threads",
        usage: "/threads",
        help: "Reload the thread list.",
        handler: super::handle_threads,
    },
    Command {
        name: "refresh",
        usage: "/refresh",
        help: "Reload messages for the selected thread.",
        handler: super::handle_refresh,
    },
    Command {
        name: "link",
        usage: "/link [url]",
        help: "Show the link to this thread, or open a thread link.",
        handler: super::handle_link,
    },
    Command {
        name: "whoami",
        usage: "/whoami",
        help: "Show the anonymous user ID.",
        handler: super::handle_whoami,
    },
    Command {
        name: "quit",
        usage: "/quit",
        help: "Leave the chat.",
        handler: super::handle_quit,
    },
];
