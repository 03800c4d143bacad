//! Application state management for the habit list screen.
//!
//! This module contains the screen state and mode management for the
//! terminal user interface.

use crate::domain::Habit;

/// Represents the current mode of the application.
///
/// The application can be in different modes that determine how user input
/// is interpreted and what UI elements are displayed.
#[derive(Debug)]
pub enum AppMode {
    /// Normal navigation mode - arrow keys move the cursor, shortcuts available
    Normal,
    /// The add field has focus - user is typing a new habit name
    AddingHabit,
    /// Delete confirmation dialog is open
    ConfirmingDelete,
    /// Edit dialog is open for the row under the cursor
    EditingHabit,
}

/// Screen-local state: the latest list snapshot plus ephemeral UI state.
///
/// Nothing in here is persisted. The habit list is whatever the live
/// subscription last emitted; text buffers and dialog state vanish with
/// the screen.
///
/// # Examples
///
/// ```
/// use habitui::application::{App, AppMode};
///
/// let app = App::default();
/// assert!(matches!(app.mode, AppMode::Normal));
/// assert!(app.habits.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Latest snapshot from the live subscription, newest-id first
    pub habits: Vec<Habit>,
    /// Cursor row in the rendered list
    pub selected: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Contents of the add field (kept when focus leaves the field)
    pub add_input: String,
    /// Contents of the edit dialog input
    pub edit_input: String,
    /// Row the edit dialog is operating on
    pub edit_target: Option<Habit>,
    /// Byte cursor within the focused text input
    pub cursor_position: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            selected: 0,
            mode: AppMode::Normal,
            add_input: String::new(),
            edit_input: String::new(),
            edit_target: None,
            cursor_position: 0,
        }
    }
}

impl App {
    /// Installs a fresh snapshot from the live subscription.
    ///
    /// Clamps the cursor so it never points past the end of a list that
    /// shrank underneath it.
    pub fn apply_snapshot(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
        if self.selected >= self.habits.len() {
            self.selected = self.habits.len().saturating_sub(1);
        }
    }

    /// The habit under the cursor, if the list is non-empty.
    pub fn selected_habit(&self) -> Option<&Habit> {
        self.habits.get(self.selected)
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.habits.len() {
            self.selected += 1;
        }
    }

    /// Moves focus into the add field, keeping whatever was typed before.
    pub fn start_adding(&mut self) {
        self.mode = AppMode::AddingHabit;
        self.cursor_position = self.add_input.len();
    }

    /// Moves focus back to the list. The field keeps its contents.
    pub fn stop_adding(&mut self) {
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    /// Submits the add field.
    ///
    /// Returns the fresh habit to persist and clears the field. Blank or
    /// whitespace-only input is a no-op and returns `None` with the field
    /// untouched; no error is shown.
    pub fn submit_add(&mut self) -> Option<Habit> {
        if self.add_input.trim().is_empty() {
            return None;
        }
        let habit = Habit::new(self.add_input.clone());
        self.add_input.clear();
        self.cursor_position = 0;
        Some(habit)
    }

    /// Flips the completion flag of the row under the cursor.
    ///
    /// Returns the updated row to persist; id and name are untouched.
    pub fn toggle_selected(&self) -> Option<Habit> {
        self.selected_habit()
            .map(|habit| habit.with_completed(!habit.is_completed))
    }

    /// Opens the delete confirmation dialog.
    ///
    /// Opens regardless of how many rows are currently completed.
    pub fn start_delete_confirm(&mut self) {
        self.mode = AppMode::ConfirmingDelete;
    }

    /// Confirms the batch delete and returns to normal mode.
    ///
    /// Returns every row flagged completed in the currently loaded list,
    /// one delete request per row.
    pub fn confirm_delete(&mut self) -> Vec<Habit> {
        self.mode = AppMode::Normal;
        self.habits
            .iter()
            .filter(|habit| habit.is_completed)
            .cloned()
            .collect()
    }

    /// Closes the delete dialog without touching the store.
    pub fn cancel_delete(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Opens the edit dialog for the row under the cursor.
    ///
    /// The input starts empty rather than pre-filled with the current name.
    /// Does nothing when the list is empty.
    pub fn start_editing(&mut self) {
        if let Some(habit) = self.selected_habit().cloned() {
            self.edit_target = Some(habit);
            self.edit_input.clear();
            self.cursor_position = 0;
            self.mode = AppMode::EditingHabit;
        }
    }

    /// Confirms the edit dialog and returns to normal mode.
    ///
    /// With non-blank input, returns the renamed row to persist; id and
    /// completion flag are preserved. Blank input closes the dialog
    /// without a write.
    pub fn finish_editing(&mut self) -> Option<Habit> {
        let target = self.edit_target.take()?;
        let update = if self.edit_input.trim().is_empty() {
            None
        } else {
            Some(target.with_name(self.edit_input.clone()))
        };
        self.edit_input.clear();
        self.cursor_position = 0;
        self.mode = AppMode::Normal;
        update
    }

    /// Dismisses the edit dialog, discarding the typed text.
    pub fn cancel_editing(&mut self) {
        self.edit_target = None;
        self.edit_input.clear();
        self.cursor_position = 0;
        self.mode = AppMode::Normal;
    }
}
