use super::*;
use crate::api::{Role, SendMessageResponse};
use crate::core::notifications::NotificationKind;
use crate::utils::test_utils::{create_test_app, create_test_message, create_test_thread};

fn act(app: &mut App, action: AppAction) -> Option<AppCommand> {
    apply_action(app, action, AppActionContext::default())
}

fn load_threads(app: &mut App, ids: &[&str]) -> Option<AppCommand> {
    let generation = match act(app, AppAction::RefreshThreads) {
        Some(AppCommand::LoadThreads { generation }) => generation,
        _ => panic!("expected thread load"),
    };
    let threads = ids
        .iter()
        .map(|id| create_test_thread(id, Some(&format!("Title {id}"))))
        .collect();
    act(
        app,
        AppAction::ThreadsLoaded {
            generation,
            result: Ok(threads),
        },
    )
}

fn message_generation(command: Option<AppCommand>, expected_thread: &str) -> u64 {
    match command {
        Some(AppCommand::LoadMessages {
            thread_id,
            generation,
        }) => {
            assert_eq!(thread_id, expected_thread);
            generation
        }
        other => panic!("expected message load for {expected_thread}, got {other:?}"),
    }
}

fn seeded_app() -> App {
    let mut app = create_test_app();
    let generation = message_generation(load_threads(&mut app, &["t1", "t2"]), "t1");
    act(
        &mut app,
        AppAction::MessagesLoaded {
            thread_id: "t1".into(),
            generation,
            result: Ok(vec![
                create_test_message("m1", "t1", Role::User, "Hello"),
                create_test_message("m2", "t1", Role::Assistant, "Hi there!"),
            ]),
        },
    );
    app
}

fn visible_ids(app: &App) -> Vec<String> {
    app.transcript.messages().map(|m| m.id.clone()).collect()
}

fn last_error(app: &App) -> Option<String> {
    app.notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::Error)
        .last()
        .map(|n| n.body.clone())
}

#[test]
fn thread_load_selects_first_thread_and_records_location() {
    let mut app = create_test_app();
    let command = load_threads(&mut app, &["t1", "t2"]);

    assert_eq!(message_generation(command, "t1"), 1);
    assert_eq!(app.selected_thread_id.as_deref(), Some("t1"));
    assert!(app.messages_loading);
    assert!(!app.threads_loading);
    assert_eq!(app.location.href(), "spur://chat/?thread=t1");
}

#[test]
fn thread_load_honours_linked_thread_when_present() {
    let mut app = create_test_app().with_location(Location::for_thread("t2"));
    assert_eq!(app.selected_thread_id.as_deref(), Some("t2"));

    // The linked thread is already selected at startup, so no second load.
    assert!(load_threads(&mut app, &["t1", "t2"]).is_none());
    assert_eq!(app.selected_thread_id.as_deref(), Some("t2"));
    assert_eq!(app.ui.sidebar_cursor, 1);
}

#[test]
fn thread_load_switches_to_linked_thread_after_open_link() {
    let mut app = seeded_app();
    app.location.push_thread("t2");

    let command = load_threads(&mut app, &["t1", "t2"]);
    message_generation(command, "t2");
    assert_eq!(app.selected_thread_id.as_deref(), Some("t2"));
}

#[test]
fn missing_linked_thread_falls_back_to_first() {
    let mut app = create_test_app().with_location(Location::for_thread("gone"));
    assert_eq!(app.selected_thread_id.as_deref(), Some("gone"));

    let command = load_threads(&mut app, &["t1"]);
    message_generation(command, "t1");
    assert_eq!(app.selected_thread_id.as_deref(), Some("t1"));
    assert_eq!(app.location.href(), "spur://chat/?thread=t1");
    assert_eq!(app.header_title(), "Title t1");
}

#[test]
fn missing_linked_thread_with_empty_list_clears_link() {
    let mut app = create_test_app().with_location(Location::for_thread("gone"));
    let stale_load = match act(&mut app, AppAction::ReloadMessages) {
        Some(AppCommand::LoadMessages { generation, .. }) => generation,
        other => panic!("expected message load, got {other:?}"),
    };

    assert!(load_threads(&mut app, &[]).is_none());
    assert!(app.selected_thread_id.is_none());
    assert_eq!(app.location.thread_id(), None);
    assert!(!app.messages_loading);
    assert_eq!(app.header_title(), "Select a thread");

    act(
        &mut app,
        AppAction::MessagesLoaded {
            thread_id: "gone".into(),
            generation: stale_load,
            result: Ok(vec![create_test_message("x", "gone", Role::User, "Late")]),
        },
    );
    assert!(app.transcript.is_empty());
}

#[test]
fn thread_created_during_refresh_survives_older_list() {
    let mut app = seeded_app();
    let in_flight = match act(&mut app, AppAction::RefreshThreads) {
        Some(AppCommand::LoadThreads { generation }) => generation,
        _ => panic!("expected load"),
    };
    act(
        &mut app,
        AppAction::ThreadCreated {
            result: Ok(create_test_thread("t9", None)),
        },
    );

    let command = act(
        &mut app,
        AppAction::ThreadsLoaded {
            generation: in_flight,
            result: Ok(vec![
                create_test_thread("t1", None),
                create_test_thread("t2", None),
            ]),
        },
    );
    assert!(command.is_none());
    assert_eq!(app.selected_thread_id.as_deref(), Some("t9"));
    assert_eq!(app.threads[0].id, "t9");
    assert!(!app.threads_loading);
}

#[test]
fn empty_thread_list_selects_nothing() {
    let mut app = create_test_app();
    assert!(load_threads(&mut app, &[]).is_none());
    assert!(app.selected_thread_id.is_none());
    assert_eq!(app.header_title(), "Select a thread");
    assert!(app.header_subtitle().is_none());
}

#[test]
fn stale_thread_list_is_dropped() {
    let mut app = create_test_app();
    let first = match act(&mut app, AppAction::RefreshThreads) {
        Some(AppCommand::LoadThreads { generation }) => generation,
        _ => panic!("expected load"),
    };
    load_threads(&mut app, &["fresh"]);

    let command = act(
        &mut app,
        AppAction::ThreadsLoaded {
            generation: first,
            result: Ok(vec![create_test_thread("stale", None)]),
        },
    );
    assert!(command.is_none());
    assert_eq!(app.threads.len(), 1);
    assert_eq!(app.threads[0].id, "fresh");
}

#[test]
fn stale_messages_leave_transcript_untouched() {
    let mut app = seeded_app();
    let old_generation = message_generation(
        act(
            &mut app,
            AppAction::SelectThread {
                thread_id: "t2".into(),
            },
        ),
        "t2",
    );
    let current = message_generation(
        act(
            &mut app,
            AppAction::SelectThread {
                thread_id: "t1".into(),
            },
        ),
        "t1",
    );
    act(
        &mut app,
        AppAction::MessagesLoaded {
            thread_id: "t1".into(),
            generation: current,
            result: Ok(vec![create_test_message("m1", "t1", Role::User, "Hello")]),
        },
    );

    act(
        &mut app,
        AppAction::MessagesLoaded {
            thread_id: "t2".into(),
            generation: old_generation,
            result: Ok(vec![create_test_message("x", "t2", Role::User, "Late")]),
        },
    );
    assert_eq!(visible_ids(&app), vec!["m1"]);
    assert!(!app.messages_loading);
}

#[test]
fn create_thread_prepends_selects_and_pushes_location() {
    let mut app = seeded_app();
    let command = act(
        &mut app,
        AppAction::CreateThread {
            title: Some("   ".into()),
        },
    );
    assert_eq!(command, Some(AppCommand::CreateThread { title: None }));

    let command = act(
        &mut app,
        AppAction::ThreadCreated {
            result: Ok(create_test_thread("t9", None)),
        },
    );
    message_generation(command, "t9");
    assert_eq!(app.threads[0].id, "t9");
    assert_eq!(app.selected_thread_id.as_deref(), Some("t9"));
    assert_eq!(app.location.thread_id().as_deref(), Some("t9"));
    assert!(app.transcript.is_empty());
    assert_eq!(app.header_title(), "Chat");
    assert_eq!(app.header_subtitle().as_deref(), Some("Thread ID: t9..."));
}

#[test]
fn create_failure_notifies_and_keeps_state() {
    let mut app = seeded_app();
    let command = act(
        &mut app,
        AppAction::ThreadCreated {
            result: Err("Failed to create thread".into()),
        },
    );
    assert!(command.is_none());
    assert_eq!(app.threads.len(), 2);
    assert_eq!(app.selected_thread_id.as_deref(), Some("t1"));
    assert_eq!(last_error(&app).as_deref(), Some("Failed to create thread"));
}

#[test]
fn select_thread_updates_location_and_loads() {
    let mut app = seeded_app();
    let command = act(
        &mut app,
        AppAction::SelectThread {
            thread_id: "t2".into(),
        },
    );
    message_generation(command, "t2");
    assert_eq!(app.header_title(), "Title t2");
    assert_eq!(app.location.href(), "spur://chat/?thread=t2");
    assert!(app.transcript.is_empty());
}

#[test]
fn delete_requires_confirmation() {
    let mut app = seeded_app();
    assert!(act(
        &mut app,
        AppAction::RequestDeleteThread {
            thread_id: "t2".into()
        }
    )
    .is_none());
    assert_eq!(
        app.ui.delete_prompt.as_ref().map(|p| p.title.as_str()),
        Some("Title t2")
    );

    act(&mut app, AppAction::CancelDelete);
    assert!(app.ui.delete_prompt.is_none());
    assert!(act(&mut app, AppAction::ConfirmDelete).is_none());

    act(
        &mut app,
        AppAction::RequestDeleteThread {
            thread_id: "t2".into(),
        },
    );
    assert_eq!(
        act(&mut app, AppAction::ConfirmDelete),
        Some(AppCommand::DeleteThread {
            thread_id: "t2".into()
        })
    );
}

#[test]
fn deleting_selected_thread_clears_then_selects_first_remaining() {
    let mut app = seeded_app();
    let command = act(
        &mut app,
        AppAction::ThreadDeleted {
            thread_id: "t1".into(),
            result: Ok(true),
        },
    );

    message_generation(command, "t2");
    assert_eq!(app.threads.len(), 1);
    assert_eq!(app.selected_thread_id.as_deref(), Some("t2"));
    assert!(app.transcript.is_empty());
    assert_eq!(app.location.href(), "spur://chat/?thread=t2");
}

#[test]
fn deleting_last_thread_leaves_nothing_selected() {
    let mut app = create_test_app();
    load_threads(&mut app, &["only"]);
    let command = act(
        &mut app,
        AppAction::ThreadDeleted {
            thread_id: "only".into(),
            result: Ok(true),
        },
    );
    assert!(command.is_none());
    assert!(app.selected_thread_id.is_none());
    assert!(!app.messages_loading);
    assert_eq!(app.location.thread_id(), None);
}

#[test]
fn deleting_other_thread_keeps_selection() {
    let mut app = seeded_app();
    let command = act(
        &mut app,
        AppAction::ThreadDeleted {
            thread_id: "t2".into(),
            result: Ok(true),
        },
    );
    assert!(command.is_none());
    assert_eq!(app.selected_thread_id.as_deref(), Some("t1"));
    assert_eq!(visible_ids(&app), vec!["m1", "m2"]);
}

#[test]
fn failed_delete_keeps_thread() {
    let mut app = seeded_app();
    act(
        &mut app,
        AppAction::ThreadDeleted {
            thread_id: "t1".into(),
            result: Err("Thread not found".into()),
        },
    );
    assert_eq!(app.threads.len(), 2);
    assert_eq!(last_error(&app).as_deref(), Some("Thread not found"));
}

#[test]
fn blank_send_issues_no_command() {
    let mut app = seeded_app();
    assert!(act(
        &mut app,
        AppAction::SendMessage {
            content: "  \n ".into()
        }
    )
    .is_none());
    assert!(!app.is_sending);
    assert_eq!(visible_ids(&app), vec!["m1", "m2"]);
}

#[test]
fn send_without_selection_is_refused() {
    let mut app = create_test_app();
    assert!(act(
        &mut app,
        AppAction::SendMessage {
            content: "hi".into()
        }
    )
    .is_none());
    assert_eq!(
        app.ui.status.as_deref(),
        Some("Select or create a thread first")
    );
}

#[test]
fn successful_send_commits_pair_and_refreshes_threads() {
    let mut app = seeded_app();
    let pending = match act(
        &mut app,
        AppAction::SendMessage {
            content: " What's up? ".into(),
        },
    ) {
        Some(AppCommand::SendMessage { pending }) => pending,
        other => panic!("expected send, got {other:?}"),
    };
    assert!(app.is_sending);
    assert_eq!(pending.content, "What's up?");
    assert_eq!(app.transcript.visible_len(), 3);

    let command = act(
        &mut app,
        AppAction::MessageSent {
            pending,
            result: Ok(SendMessageResponse {
                message: create_test_message("m3", "t1", Role::User, "What's up?"),
                response: create_test_message("m4", "t1", Role::Assistant, "Not much."),
            }),
        },
    );

    assert!(matches!(command, Some(AppCommand::LoadThreads { .. })));
    assert!(!app.is_sending);
    assert_eq!(visible_ids(&app), vec!["m1", "m2", "m3", "m4"]);
}

#[test]
fn failed_send_rolls_back_and_notifies() {
    let mut app = seeded_app();
    let pending = match act(
        &mut app,
        AppAction::SendMessage {
            content: "Doomed".into(),
        },
    ) {
        Some(AppCommand::SendMessage { pending }) => pending,
        _ => panic!("expected send"),
    };

    let command = act(
        &mut app,
        AppAction::MessageSent {
            pending,
            result: Err("HTTP error! status: 502".into()),
        },
    );
    assert!(command.is_none());
    assert!(!app.is_sending);
    assert_eq!(visible_ids(&app), vec!["m1", "m2"]);
    assert_eq!(last_error(&app).as_deref(), Some("HTTP error! status: 502"));
    assert_eq!(
        app.notifications.iter().last().map(|n| n.kind.title()),
        Some("Error")
    );
}

#[test]
fn second_submit_while_sending_keeps_draft() {
    let mut app = seeded_app();
    app.ui.set_input_text("first");
    assert!(matches!(
        act(&mut app, AppAction::SubmitInput),
        Some(AppCommand::SendMessage { .. })
    ));
    assert_eq!(app.ui.get_input_text(), "");

    app.ui.set_input_text("second");
    assert!(act(&mut app, AppAction::SubmitInput).is_none());
    assert_eq!(app.ui.get_input_text(), "second");
    assert_eq!(
        app.ui.status.as_deref(),
        Some("Still waiting for the last reply")
    );
    assert_eq!(app.transcript.visible_len(), 3);
}

#[test]
fn send_resolving_after_thread_switch_changes_nothing_visible() {
    let mut app = seeded_app();
    let pending = match act(
        &mut app,
        AppAction::SendMessage {
            content: "Question".into(),
        },
    ) {
        Some(AppCommand::SendMessage { pending }) => pending,
        _ => panic!("expected send"),
    };
    let generation = message_generation(
        act(
            &mut app,
            AppAction::SelectThread {
                thread_id: "t2".into(),
            },
        ),
        "t2",
    );
    act(
        &mut app,
        AppAction::MessagesLoaded {
            thread_id: "t2".into(),
            generation,
            result: Ok(vec![create_test_message("o1", "t2", Role::User, "Other")]),
        },
    );

    act(
        &mut app,
        AppAction::MessageSent {
            pending,
            result: Ok(SendMessageResponse {
                message: create_test_message("m3", "t1", Role::User, "Question"),
                response: create_test_message("m4", "t1", Role::Assistant, "Answer"),
            }),
        },
    );
    assert!(!app.is_sending);
    assert_eq!(visible_ids(&app), vec!["o1"]);
}

#[test]
fn slash_command_from_input_dispatches_action() {
    let mut app = seeded_app();
    app.ui.set_input_text("/new Ideas");
    let command = act(&mut app, AppAction::SubmitInput);
    assert_eq!(
        command,
        Some(AppCommand::CreateThread {
            title: Some("Ideas".into())
        })
    );
    assert_eq!(app.ui.get_input_text(), "");
}

#[test]
fn open_link_selects_named_thread() {
    let mut app = seeded_app();
    let command = act(
        &mut app,
        AppAction::OpenLink {
            link: "http://localhost:5173/?thread=t2".into(),
        },
    );
    message_generation(command, "t2");

    assert!(act(
        &mut app,
        AppAction::OpenLink {
            link: "spur://chat/".into()
        }
    )
    .is_none());
    assert_eq!(
        app.ui.status.as_deref(),
        Some("That link does not name a thread")
    );

    act(
        &mut app,
        AppAction::OpenLink {
            link: "::nope".into(),
        },
    );
    assert!(last_error(&app).is_some());
}

#[test]
fn load_errors_become_notifications() {
    let mut app = create_test_app();
    let generation = match act(&mut app, AppAction::RefreshThreads) {
        Some(AppCommand::LoadThreads { generation }) => generation,
        _ => panic!("expected load"),
    };
    act(
        &mut app,
        AppAction::ThreadsLoaded {
            generation,
            result: Err("User ID not found. Please set your user ID first.".into()),
        },
    );
    assert!(!app.threads_loading);
    assert_eq!(
        last_error(&app).as_deref(),
        Some("User ID not found. Please set your user ID first.")
    );
}

#[test]
fn quit_requests_exit() {
    let mut app = create_test_app();
    act(&mut app, AppAction::Quit);
    assert!(app.ui.exit_requested);
}
