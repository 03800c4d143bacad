use crate::application::{App, AppMode, HabitManager};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        app: &mut App,
        manager: &HabitManager,
        key: KeyCode,
        _modifiers: KeyModifiers,
    ) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, manager, key),
            AppMode::AddingHabit => Self::handle_adding_mode(app, manager, key),
            AppMode::ConfirmingDelete => Self::handle_delete_confirm_mode(app, manager, key),
            AppMode::EditingHabit => Self::handle_editing_mode(app, manager, key),
        }
    }

    fn handle_normal_mode(app: &mut App, manager: &HabitManager, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next();
            }
            KeyCode::Char(' ') => {
                if let Some(toggled) = app.toggle_selected() {
                    manager.request_update(toggled);
                }
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                app.start_editing();
            }
            KeyCode::Char('a') | KeyCode::Char('i') => {
                app.start_adding();
            }
            KeyCode::Char('d') => {
                app.start_delete_confirm();
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_adding_mode(app: &mut App, manager: &HabitManager, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                if let Some(habit) = app.submit_add() {
                    manager.request_add(habit);
                }
            }
            KeyCode::Esc => {
                app.stop_adding();
            }
            _ => Self::handle_text_key(app, key),
        }
    }

    fn handle_delete_confirm_mode(app: &mut App, manager: &HabitManager, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('y') => {
                for habit in app.confirm_delete() {
                    manager.request_delete(habit);
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                app.cancel_delete();
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, manager: &HabitManager, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                if let Some(updated) = app.finish_editing() {
                    manager.request_update(updated);
                }
            }
            KeyCode::Esc => {
                app.cancel_editing();
            }
            _ => Self::handle_text_key(app, key),
        }
    }

    // Shared text editing for whichever input the current mode owns.
    // The cursor is a byte offset and always lands on a char boundary.
    fn handle_text_key(app: &mut App, key: KeyCode) {
        let cursor = app.cursor_position;
        let input = match app.mode {
            AppMode::AddingHabit => &mut app.add_input,
            AppMode::EditingHabit => &mut app.edit_input,
            _ => return,
        };

        match key {
            KeyCode::Backspace => {
                if let Some(len) = input[..cursor].chars().next_back().map(char::len_utf8) {
                    input.remove(cursor - len);
                    app.cursor_position = cursor - len;
                }
            }
            KeyCode::Delete => {
                if cursor < input.len() {
                    input.remove(cursor);
                }
            }
            KeyCode::Left => {
                if let Some(len) = input[..cursor].chars().next_back().map(char::len_utf8) {
                    app.cursor_position = cursor - len;
                }
            }
            KeyCode::Right => {
                if let Some(len) = input[cursor..].chars().next().map(char::len_utf8) {
                    app.cursor_position = cursor + len;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = input.len();
            }
            KeyCode::Char(c) => {
                input.insert(cursor, c);
                app.cursor_position = cursor + c.len_utf8();
            }
            _ => {}
        }
    }
}
