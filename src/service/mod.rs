//! Habit operations as request/response contracts over a [`Store`].
//!
//! Input is validated here before any store access, so a rejected request never
//! opens a transaction.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Habit, HabitChanges, NewHabit};

pub struct HabitService {
    store: Arc<dyn Store>,
}

impl HabitService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Every habit ordered by id, each with its activity log ascending.
    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        self.store.list_habits()
    }

    pub fn get_habit(&self, id: i64) -> Result<Habit> {
        self.store.get_habit(id)?.ok_or(Error::NotFound)
    }

    pub fn create_habit(&self, name: Option<String>, color: Option<String>) -> Result<Habit> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::validation("Habit name is required"))?;

        let habit = self.store.create_habit(&NewHabit { name, color })?;
        tracing::debug!("Created habit {} ({})", habit.id, habit.name);
        Ok(habit)
    }

    /// Applies only the supplied fields, then returns the habit with its current log.
    pub fn update_habit(&self, id: i64, mut changes: HabitChanges) -> Result<Habit> {
        if changes.is_empty() {
            return Err(Error::validation("No fields provided to update"));
        }
        if let Some(name) = changes.name.take() {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::validation("Habit name cannot be empty"));
            }
            changes.name = Some(name.to_string());
        }

        if !self.store.update_habit(id, &changes)? {
            return Err(Error::NotFound);
        }
        self.get_habit(id)
    }

    /// Replaces the habit's whole activity log with `dates`.
    ///
    /// Each date is `YYYY-MM-DD` or an RFC 3339 timestamp. Duplicates collapse to one
    /// entry. The swap is all-or-nothing.
    pub fn replace_activity_log<S: AsRef<str>>(&self, id: i64, dates: &[S]) -> Result<Habit> {
        let dates = dates
            .iter()
            .map(|d| parse_activity_date(d.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;
        let dates: Vec<NaiveDate> = dates.into_iter().collect();

        if !self.store.replace_activity_log(id, &dates)? {
            return Err(Error::NotFound);
        }
        tracing::debug!("Replaced activity log of habit {} ({} dates)", id, dates.len());

        self.get_habit(id)
    }

    pub fn delete_habit(&self, id: i64) -> Result<()> {
        if !self.store.delete_habit(id)? {
            return Err(Error::NotFound);
        }
        tracing::debug!("Deleted habit {}", id);
        Ok(())
    }
}

/// Parses a calendar date, accepting a full timestamp and keeping its UTC date.
///
/// Years are limited to four digits: dates are stored as text and must sort
/// chronologically as strings.
pub fn parse_activity_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.naive_utc().date()))
        .ok()
        .filter(|date| (0..=9999).contains(&date.year()))
        .ok_or_else(|| Error::validation(format!("Invalid date: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn service() -> HabitService {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        HabitService::new(Arc::new(store))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_create_habit() {
        let service = service();

        let habit = service
            .create_habit(Some("Drawing".to_string()), Some("#d6b4fc".to_string()))
            .unwrap();

        assert_eq!(habit.name, "Drawing");
        assert_eq!(habit.color.as_deref(), Some("#d6b4fc"));
        assert!(habit.activity_log.is_empty());
        assert_eq!(service.get_habit(habit.id).unwrap(), habit);
    }

    #[test]
    fn test_create_habit_requires_name() {
        let service = service();

        for name in [None, Some(String::new()), Some("   ".to_string())] {
            let result = service.create_habit(name, Some("#fff".to_string()));
            match result {
                Err(Error::Validation(msg)) => assert_eq!(msg, "Habit name is required"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert!(service.list_habits().unwrap().is_empty());
    }

    #[test]
    fn test_update_habit_returns_current_log() {
        let service = service();
        let habit = service.create_habit(Some("Yoga".to_string()), None).unwrap();
        service
            .replace_activity_log(habit.id, &["2024-05-02", "2024-05-01"])
            .unwrap();

        let updated = service
            .update_habit(
                habit.id,
                HabitChanges {
                    name: None,
                    color: Some(Some("#123456".to_string())),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Yoga");
        assert_eq!(updated.color.as_deref(), Some("#123456"));
        assert_eq!(
            updated.activity_log,
            vec![date("2024-05-01"), date("2024-05-02")]
        );
    }

    #[test]
    fn test_update_habit_validation() {
        let service = service();
        let habit = service.create_habit(Some("Yoga".to_string()), None).unwrap();

        let result = service.update_habit(habit.id, HabitChanges::default());
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = service.update_habit(
            habit.id,
            HabitChanges {
                name: Some(" ".to_string()),
                color: None,
            },
        );
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(service.get_habit(habit.id).unwrap().name, "Yoga");
    }

    #[test]
    fn test_update_missing_habit() {
        let service = service();
        let result = service.update_habit(
            999,
            HabitChanges {
                name: Some("Ghost".to_string()),
                color: None,
            },
        );
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[test]
    fn test_replace_activity_log_sorts_and_dedupes() {
        let service = service();
        let habit = service.create_habit(Some("Drawing".to_string()), None).unwrap();

        let updated = service
            .replace_activity_log(
                habit.id,
                &["2024-01-01", "2024-01-03", "2024-01-02", "2024-01-03"],
            )
            .unwrap();

        assert_eq!(
            updated.activity_log,
            vec![date("2024-01-01"), date("2024-01-02"), date("2024-01-03")]
        );
        assert_eq!(service.store().list_activity_entries(habit.id).unwrap().len(), 3);
    }

    #[test]
    fn test_replace_activity_log_rejects_bad_dates_before_writing() {
        let service = service();
        let habit = service.create_habit(Some("Drawing".to_string()), None).unwrap();
        service.replace_activity_log(habit.id, &["2024-01-01"]).unwrap();

        let result = service.replace_activity_log(habit.id, &["2024-01-02", "orange"]);
        match result {
            Err(Error::Validation(msg)) => assert_eq!(msg, "Invalid date: orange"),
            other => panic!("expected validation error, got {other:?}"),
        }

        assert_eq!(
            service.get_habit(habit.id).unwrap().activity_log,
            vec![date("2024-01-01")]
        );
    }

    #[test]
    fn test_replace_activity_log_rejects_signed_years() {
        let service = service();
        let habit = service.create_habit(Some("Drawing".to_string()), None).unwrap();
        service.replace_activity_log(habit.id, &["2024-01-01"]).unwrap();

        for value in ["+10000-01-01", "-0001-06-01"] {
            let result = service.replace_activity_log(habit.id, &["2024-01-02", value]);
            assert!(matches!(result, Err(Error::Validation(_))), "accepted {value}");
        }

        let habits = service.list_habits().unwrap();
        assert_eq!(habits[0].activity_log, vec![date("2024-01-01")]);
    }

    #[test]
    fn test_replace_activity_log_missing_habit() {
        let service = service();
        let result = service.replace_activity_log(999, &["2024-01-01"]);
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[test]
    fn test_delete_habit_twice() {
        let service = service();
        let habit = service.create_habit(Some("Drawing".to_string()), None).unwrap();
        service.replace_activity_log(habit.id, &["2024-01-01"]).unwrap();

        service.delete_habit(habit.id).unwrap();
        assert!(matches!(service.delete_habit(habit.id), Err(Error::NotFound)));
        assert!(matches!(service.get_habit(habit.id), Err(Error::NotFound)));
        assert!(service.store().list_activity_entries(habit.id).unwrap().is_empty());
    }

    #[test]
    fn test_parse_activity_date() {
        assert_eq!(parse_activity_date("2024-01-05").unwrap(), date("2024-01-05"));
        assert_eq!(
            parse_activity_date("2024-01-05T23:30:00.000Z").unwrap(),
            date("2024-01-05")
        );
        assert_eq!(
            parse_activity_date("2024-01-05T01:00:00+02:00").unwrap(),
            date("2024-01-04")
        );
        assert_eq!(parse_activity_date("0000-01-01").unwrap().year(), 0);
        assert_eq!(parse_activity_date("9999-12-31").unwrap().year(), 9999);
        assert!(parse_activity_date("2024-13-01").is_err());
        assert!(parse_activity_date("+10000-01-01").is_err());
        assert!(parse_activity_date("-0001-06-01").is_err());
        assert!(parse_activity_date("").is_err());
    }
}
