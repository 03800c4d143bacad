/// The sole persisted entity: a named, completable habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub is_completed: bool,
}

impl Habit {
    /// Creates a habit that has not been persisted yet. The store assigns
    /// the real id on insert; until then the id is 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            is_completed: false,
        }
    }

    /// Copy of this row with a new name, keeping id and completion flag.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            id: self.id,
            name: name.into(),
            is_completed: self.is_completed,
        }
    }

    /// Copy of this row with the completion flag replaced.
    pub fn with_completed(&self, is_completed: bool) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            is_completed,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_habit_is_fresh_and_incomplete() {
        let habit = Habit::new("운동");
        assert_eq!(habit.id, 0);
        assert_eq!(habit.name, "운동");
        assert!(!habit.is_completed);
        assert!(!habit.is_persisted());
    }

    #[test]
    fn test_with_name_preserves_id_and_completion() {
        let habit = Habit {
            id: 7,
            name: "독서".to_string(),
            is_completed: true,
        };
        let renamed = habit.with_name("수면");
        assert_eq!(renamed.id, 7);
        assert_eq!(renamed.name, "수면");
        assert!(renamed.is_completed);
    }

    #[test]
    fn test_with_completed_preserves_id_and_name() {
        let habit = Habit {
            id: 3,
            name: "독서".to_string(),
            is_completed: false,
        };
        let toggled = habit.with_completed(true);
        assert_eq!(toggled.id, 3);
        assert_eq!(toggled.name, "독서");
        assert!(toggled.is_completed);
    }
}
