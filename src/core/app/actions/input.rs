use super::{apply_action, messages, App, AppAction, AppActionContext, AppCommand};
use crate::commands::{process_input, CommandResult};

pub(super) fn handle_input_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput => submit_input(app, ctx),
        AppAction::InsertIntoInput { text } => {
            app.ui.focus_input();
            app.ui.apply_textarea_edit(|textarea| {
                textarea.insert_str(text);
            });
            None
        }
        AppAction::ClearInput => {
            app.ui.clear_input();
            None
        }
        AppAction::SetStatus { message } => {
            app.ui.set_status(message);
            None
        }
        AppAction::ClearStatus => {
            app.ui.clear_status();
            None
        }
        AppAction::Notify { message } => {
            app.notifications.error(message);
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
        _ => unreachable!("non-input action routed to input handler"),
    }
}

fn submit_input(app: &mut App, ctx: AppActionContext) -> Option<AppCommand> {
    let input = app.ui.get_input_text();
    if input.trim().is_empty() {
        return None;
    }

    match process_input(app, &input) {
        CommandResult::Continue => {
            app.ui.clear_input();
            None
        }
        CommandResult::Dispatch(action) => {
            app.ui.clear_input();
            apply_action(app, action, ctx)
        }
        CommandResult::ProcessAsMessage(message) => {
            let command = messages::send_message(app, &message);
            // A refused send keeps the draft so nothing typed is lost.
            if command.is_some() {
                app.ui.clear_input();
            }
            command
        }
    }
}
