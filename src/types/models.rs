use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A habit together with its activity log, sorted ascending by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
    pub activity_log: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub color: Option<String>,
}

/// Fields to change on an existing habit. `None` leaves the column untouched;
/// `Some(None)` clears the color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitChanges {
    pub name: Option<String>,
    pub color: Option<Option<String>>,
}

impl HabitChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: i64,
    pub habit_id: i64,
    pub log_date: NaiveDate,
}
