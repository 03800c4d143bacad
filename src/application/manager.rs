//! State manager: the only intermediary between the screen and the store.
//!
//! Write requests are fire-and-forget. They are queued to a background
//! worker thread and the caller returns immediately; the screen observes
//! the effect through the next emission of the live subscription.

use crate::domain::Habit;
use crate::infrastructure::{HabitStore, StoreResult, Subscription};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};
use std::thread::{self, JoinHandle};

enum Command {
    Add(Habit),
    Update(Habit),
    Delete(Habit),
}

/// Forwards screen commands to the store and exposes its live list.
///
/// Owns no business logic beyond delegation. Lifecycle is bound to the
/// screen: dropping the manager closes the queue, lets in-flight writes
/// finish, and joins the worker.
pub struct HabitManager {
    store: Arc<HabitStore>,
    commands: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl HabitManager {
    pub fn new(store: Arc<HabitStore>) -> Self {
        let (commands, queue) = channel::<Command>();
        let writer = Arc::clone(&store);
        let worker = thread::spawn(move || {
            for command in queue {
                let result = match &command {
                    Command::Add(habit) => writer.insert(habit),
                    Command::Update(habit) => writer.update(habit),
                    Command::Delete(habit) => writer.delete(habit),
                };
                // Best effort: log and keep draining the queue.
                if let Err(err) = result {
                    warn!("background write failed: {err}");
                }
            }
            debug!("write worker finished");
        });

        Self {
            store,
            commands: Some(commands),
            worker: Some(worker),
        }
    }

    /// The store's live list, exposed unchanged.
    pub fn habits(&self) -> StoreResult<Subscription> {
        self.store.subscribe()
    }

    /// Schedules an insert of a fresh habit. Returns immediately.
    pub fn request_add(&self, habit: Habit) {
        self.send(Command::Add(habit));
    }

    /// Schedules a full-row replace keyed by the habit's id.
    pub fn request_update(&self, habit: Habit) {
        self.send(Command::Update(habit));
    }

    /// Schedules removal of the row keyed by the habit's id.
    pub fn request_delete(&self, habit: Habit) {
        self.send(Command::Delete(habit));
    }

    /// Stops accepting new requests and waits for queued writes to finish.
    pub fn shutdown(&mut self) {
        self.commands.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    fn send(&self, command: Command) {
        let Some(commands) = &self.commands else {
            warn!("write request after shutdown was dropped");
            return;
        };
        if commands.send(command).is_err() {
            warn!("write worker is gone, request dropped");
        }
    }
}

impl Drop for HabitManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
