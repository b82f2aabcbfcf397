mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Habit operations
    fn list_habits(&self) -> Result<Vec<Habit>>;
    fn get_habit(&self, id: i64) -> Result<Option<Habit>>;
    fn create_habit(&self, habit: &NewHabit) -> Result<Habit>;
    /// Returns `false` when no habit matched. `changes` must carry at least one field.
    fn update_habit(&self, id: i64, changes: &HabitChanges) -> Result<bool>;
    /// Removes the habit and its activity log in one transaction.
    fn delete_habit(&self, id: i64) -> Result<bool>;

    // Activity log operations (one-to-many with habits)
    fn list_activity_entries(&self, habit_id: i64) -> Result<Vec<ActivityLogEntry>>;
    /// Atomically swaps the habit's log for `dates`, which must be distinct.
    /// Returns `false` without writing anything when the habit does not exist.
    fn replace_activity_log(&self, habit_id: i64, dates: &[NaiveDate]) -> Result<bool>;
}
