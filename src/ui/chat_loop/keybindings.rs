//! Key handling for the chat view.
//!
//! Pane-local state (focus, sidebar cursor, scrolling, text editing) is changed
//! in place; anything that touches threads or messages comes back as
//! [`AppAction`]s for the reducer.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::{App, AppAction, UiFocus};

pub(super) fn handle_key(app: &mut App, key: KeyEvent) -> Vec<AppAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![AppAction::Quit];
    }

    if app.ui.delete_prompt.is_some() {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                vec![AppAction::ConfirmDelete]
            }
            _ => vec![AppAction::CancelDelete],
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.ui.toggle_focus();
            return Vec::new();
        }
        KeyCode::PageUp => {
            let page = app.ui.page_lines();
            app.ui.scroll_up(page);
            return Vec::new();
        }
        KeyCode::PageDown => {
            let page = app.ui.page_lines();
            app.ui.scroll_down(page);
            return Vec::new();
        }
        KeyCode::Esc => {
            if app.ui.status.is_some() {
                app.ui.clear_status();
            } else if !app.notifications.is_empty() {
                app.notifications.clear();
            } else {
                app.ui.focus_input();
            }
            return Vec::new();
        }
        _ => {}
    }

    match app.ui.focus {
        UiFocus::Input => handle_input_key(app, key),
        UiFocus::Sidebar => handle_sidebar_key(app, key),
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) -> Vec<AppAction> {
    if key.code == KeyCode::Enter {
        if key
            .modifiers
            .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT)
        {
            app.ui.apply_textarea_edit(|textarea| textarea.insert_newline());
            return Vec::new();
        }
        return vec![AppAction::SubmitInput];
    }

    app.ui.apply_textarea_edit(|textarea| {
        textarea.input(tui_textarea::Input::from(key));
    });
    Vec::new()
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) -> Vec<AppAction> {
    let last = app.threads.len().saturating_sub(1);
    let cursor_thread = app
        .threads
        .get(app.ui.sidebar_cursor)
        .map(|thread| thread.id.clone());

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.ui.sidebar_cursor = app.ui.sidebar_cursor.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.ui.sidebar_cursor = (app.ui.sidebar_cursor + 1).min(last);
            Vec::new()
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.ui.sidebar_cursor = 0;
            Vec::new()
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.ui.sidebar_cursor = last;
            Vec::new()
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => match cursor_thread {
            Some(thread_id) => {
                app.ui.focus_input();
                vec![AppAction::SelectThread { thread_id }]
            }
            None => Vec::new(),
        },
        KeyCode::Char('n') => vec![AppAction::CreateThread { title: None }],
        KeyCode::Char('d') | KeyCode::Delete => match cursor_thread {
            Some(thread_id) => vec![AppAction::RequestDeleteThread { thread_id }],
            None => Vec::new(),
        },
        KeyCode::Char('r') => vec![AppAction::RefreshThreads],
        KeyCode::Char('i') => {
            app.ui.focus_input();
            Vec::new()
        }
        KeyCode::Char('q') => vec![AppAction::Quit],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{create_test_app, create_test_thread};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_threads() -> App {
        let mut app = create_test_app();
        app.threads = vec![
            create_test_thread("t1", None),
            create_test_thread("t2", None),
            create_test_thread("t3", None),
        ];
        app.ui.focus_sidebar();
        app
    }

    #[test]
    fn typing_edits_input_and_enter_submits() {
        let mut app = create_test_app();
        for ch in "hi".chars() {
            assert!(handle_key(&mut app, press(KeyCode::Char(ch))).is_empty());
        }
        assert_eq!(app.ui.get_input_text(), "hi");

        let newline = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        assert!(handle_key(&mut app, newline).is_empty());
        assert_eq!(app.ui.get_input_text(), "hi\n");

        let actions = handle_key(&mut app, press(KeyCode::Enter));
        assert!(matches!(actions.as_slice(), [AppAction::SubmitInput]));
    }

    #[test]
    fn sidebar_navigation_clamps_and_selects() {
        let mut app = app_with_threads();
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.ui.sidebar_cursor, 2);
        handle_key(&mut app, press(KeyCode::Char('k')));

        let actions = handle_key(&mut app, press(KeyCode::Enter));
        match actions.as_slice() {
            [AppAction::SelectThread { thread_id }] => assert_eq!(thread_id, "t2"),
            _ => panic!("expected select"),
        }
        assert!(app.ui.is_input_focused());
    }

    #[test]
    fn delete_needs_explicit_confirmation() {
        let mut app = app_with_threads();
        let actions = handle_key(&mut app, press(KeyCode::Char('d')));
        assert!(matches!(
            actions.as_slice(),
            [AppAction::RequestDeleteThread { .. }]
        ));

        app.ui.delete_prompt = Some(crate::core::app::DeletePrompt {
            thread_id: "t1".into(),
            title: "Thread t1".into(),
        });
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::Char('x'))).as_slice(),
            [AppAction::CancelDelete]
        ));
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::Char('y'))).as_slice(),
            [AppAction::ConfirmDelete]
        ));
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = create_test_app();
        let actions = handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(matches!(actions.as_slice(), [AppAction::Quit]));
    }

    #[test]
    fn page_keys_scroll_by_half_the_terminal() {
        let mut app = create_test_app();
        app.ui.last_term_size = ratatui::prelude::Size::new(100, 30);

        handle_key(&mut app, press(KeyCode::PageUp));
        handle_key(&mut app, press(KeyCode::PageUp));
        assert_eq!(app.ui.scroll_from_bottom, 30);

        handle_key(&mut app, press(KeyCode::PageDown));
        assert_eq!(app.ui.scroll_from_bottom, 15);
    }

    #[test]
    fn tab_toggles_focus() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.ui.focus, UiFocus::Sidebar);
        assert!(handle_key(&mut app, press(KeyCode::Char('n')))
            .iter()
            .any(|action| matches!(action, AppAction::CreateThread { title: None })));
    }
}
