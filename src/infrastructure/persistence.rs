//! SQLite-backed habit store with a live full-list subscription.
//!
//! The subscription is the only public read path: subscribers get the
//! current list immediately and a fresh snapshot after every write.

use crate::domain::Habit;
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;
use thiserror::Error;

pub const DB_FILE_NAME: &str = "habits.db";

const SCHEMA_HABITS: &str = "CREATE TABLE IF NOT EXISTS habits (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    is_completed INTEGER NOT NULL DEFAULT 0
);";
const INSERT_HABIT: &str = "INSERT INTO habits (name, is_completed) VALUES (?1, ?2)";
const REPLACE_HABIT: &str =
    "INSERT OR REPLACE INTO habits (id, name, is_completed) VALUES (?1, ?2, ?3)";
const UPDATE_HABIT: &str = "UPDATE habits SET name = ?1, is_completed = ?2 WHERE id = ?3";
const DELETE_HABIT: &str = "DELETE FROM habits WHERE id = ?1";
const SELECT_HABITS: &str = "SELECT id, name, is_completed FROM habits ORDER BY id DESC";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Live feed of full-list snapshots, newest-id first.
pub struct Subscription {
    rx: Receiver<Vec<Habit>>,
}

impl Subscription {
    /// Blocks until the next emission. Returns `None` once the store is gone.
    pub fn recv(&self) -> Option<Vec<Habit>> {
        self.rx.recv().ok()
    }

    /// Drains every pending emission and returns the newest, if any.
    pub fn latest(&self) -> Option<Vec<Habit>> {
        let mut latest = None;
        while let Ok(habits) = self.rx.try_recv() {
            latest = Some(habits);
        }
        latest
    }
}

struct StoreInner {
    conn: Connection,
    subscribers: Vec<Sender<Vec<Habit>>>,
}

/// Single-table store of habit rows.
///
/// Shared between the UI thread and the write worker; one mutex over the
/// connection and the subscriber list keeps emission order equal to write
/// order.
pub struct HabitStore {
    inner: Mutex<StoreInner>,
}

impl HabitStore {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute(SCHEMA_HABITS, [])?;
        Ok(Self {
            inner: Mutex::new(StoreInner {
                conn,
                subscribers: Vec::new(),
            }),
        })
    }

    /// Writes a new row. A fresh habit (id 0) gets a store-assigned id;
    /// a row carrying an explicit id fully replaces any row with that id.
    pub fn insert(&self, habit: &Habit) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        if habit.is_persisted() {
            inner.conn.execute(
                REPLACE_HABIT,
                params![habit.id, habit.name, habit.is_completed],
            )?;
        } else {
            inner
                .conn
                .execute(INSERT_HABIT, params![habit.name, habit.is_completed])?;
        }
        Self::publish(&mut inner)
    }

    /// Full-row replace keyed by id. No-op when no such row exists.
    pub fn update(&self, habit: &Habit) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.conn.execute(
            UPDATE_HABIT,
            params![habit.name, habit.is_completed, habit.id],
        )?;
        Self::publish(&mut inner)
    }

    /// Removes the row keyed by id. No-op when absent.
    pub fn delete(&self, habit: &Habit) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.conn.execute(DELETE_HABIT, params![habit.id])?;
        Self::publish(&mut inner)
    }

    /// Registers a subscriber and delivers the current list right away.
    pub fn subscribe(&self) -> StoreResult<Subscription> {
        let mut inner = self.inner.lock();
        let snapshot = Self::load_all(&inner.conn)?;
        let (tx, rx) = channel();
        // Cannot fail, the receiver is still in scope.
        let _ = tx.send(snapshot);
        inner.subscribers.push(tx);
        Ok(Subscription { rx })
    }

    fn publish(inner: &mut StoreInner) -> StoreResult<()> {
        let snapshot = Self::load_all(&inner.conn)?;
        inner
            .subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
        Ok(())
    }

    fn load_all(conn: &Connection) -> StoreResult<Vec<Habit>> {
        let mut stmt = conn.prepare(SELECT_HABITS)?;
        let rows = stmt.query_map([], |row| {
            Ok(Habit {
                id: row.get(0)?,
                name: row.get(1)?,
                is_completed: row.get(2)?,
            })
        })?;
        let mut habits = Vec::new();
        for habit in rows {
            habits.push(habit?);
        }
        Ok(habits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HabitStore {
        HabitStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_assigns_fresh_distinct_ids() {
        let store = store();
        store.insert(&Habit::new("운동")).unwrap();
        store.insert(&Habit::new("독서")).unwrap();

        let habits = store.subscribe().unwrap().recv().unwrap();
        assert_eq!(habits.len(), 2);
        assert_ne!(habits[0].id, habits[1].id);
        assert!(habits.iter().all(|h| h.is_persisted()));
        assert!(habits.iter().all(|h| !h.is_completed));
    }

    #[test]
    fn test_list_is_ordered_newest_id_first() {
        let store = store();
        for name in ["운동", "독서", "수면"] {
            store.insert(&Habit::new(name)).unwrap();
        }

        let habits = store.subscribe().unwrap().recv().unwrap();
        let names: Vec<&str> = habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["수면", "독서", "운동"]);
        assert!(habits[0].id > habits[1].id && habits[1].id > habits[2].id);
    }

    #[test]
    fn test_subscribe_delivers_current_list_immediately() {
        let store = store();
        store.insert(&Habit::new("운동")).unwrap();

        let sub = store.subscribe().unwrap();
        let habits = sub.recv().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "운동");
    }

    #[test]
    fn test_subscription_emits_after_every_mutation() {
        let store = store();
        let sub = store.subscribe().unwrap();
        assert!(sub.recv().unwrap().is_empty());

        store.insert(&Habit::new("운동")).unwrap();
        let habit = sub.recv().unwrap()[0].clone();

        store.update(&habit.with_completed(true)).unwrap();
        assert!(sub.recv().unwrap()[0].is_completed);

        store.delete(&habit).unwrap();
        assert!(sub.recv().unwrap().is_empty());
    }

    #[test]
    fn test_insert_with_existing_id_replaces_the_row() {
        let store = store();
        store.insert(&Habit::new("운동")).unwrap();
        let habit = store.subscribe().unwrap().recv().unwrap()[0].clone();

        store.insert(&habit.with_name("산책")).unwrap();

        let habits = store.subscribe().unwrap().recv().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].id, habit.id);
        assert_eq!(habits[0].name, "산책");
    }

    #[test]
    fn test_update_of_missing_row_is_a_no_op() {
        let store = store();
        let ghost = Habit {
            id: 42,
            name: "유령".to_string(),
            is_completed: false,
        };
        store.update(&ghost).unwrap();
        assert!(store.subscribe().unwrap().recv().unwrap().is_empty());
    }

    #[test]
    fn test_delete_of_missing_row_is_a_no_op() {
        let store = store();
        store.insert(&Habit::new("운동")).unwrap();
        let ghost = Habit {
            id: 42,
            name: "유령".to_string(),
            is_completed: false,
        };
        store.delete(&ghost).unwrap();
        assert_eq!(store.subscribe().unwrap().recv().unwrap().len(), 1);
    }

    #[test]
    fn test_update_touches_only_the_named_row() {
        let store = store();
        store.insert(&Habit::new("운동")).unwrap();
        store.insert(&Habit::new("독서")).unwrap();
        let habits = store.subscribe().unwrap().recv().unwrap();
        let reading = habits.iter().find(|h| h.name == "독서").unwrap().clone();

        store.update(&reading.with_completed(true)).unwrap();

        let habits = store.subscribe().unwrap().recv().unwrap();
        for habit in &habits {
            if habit.id == reading.id {
                assert!(habit.is_completed);
                assert_eq!(habit.name, "독서");
            } else {
                assert!(!habit.is_completed);
            }
        }
    }

    #[test]
    fn test_dropped_subscriber_is_pruned_on_next_emission() {
        let store = store();
        let sub = store.subscribe().unwrap();
        drop(sub);
        let _live = store.subscribe().unwrap();

        store.insert(&Habit::new("운동")).unwrap();
        assert_eq!(store.inner.lock().subscribers.len(), 1);
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILE_NAME);

        let store = HabitStore::open(&path).unwrap();
        store.insert(&Habit::new("운동")).unwrap();
        drop(store);

        let store = HabitStore::open(&path).unwrap();
        let habits = store.subscribe().unwrap().recv().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "운동");
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let store = store();
        store.insert(&Habit::new("운동")).unwrap();
        let habit = store.subscribe().unwrap().recv().unwrap()[0].clone();
        assert_eq!(habit.id, 1);

        store.update(&habit.with_completed(true)).unwrap();
        store.delete(&habit).unwrap();
        assert!(store.subscribe().unwrap().recv().unwrap().is_empty());

        store.insert(&Habit::new("독서")).unwrap();
        store.insert(&Habit::new("수면")).unwrap();

        let habits = store.subscribe().unwrap().recv().unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].id, 3);
        assert_eq!(habits[0].name, "수면");
        assert_eq!(habits[1].id, 2);
        assert_eq!(habits[1].name, "독서");
    }
}
