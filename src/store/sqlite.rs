use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::types::{ToSql, Type};
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

// LEFT JOIN so habits without any logs still produce one row, with a NULL log_date.
const SELECT_HABITS_WITH_LOGS: &str = "SELECT h.id, h.name, h.color, l.log_date
     FROM habits h
     LEFT JOIN activity_logs l ON l.habit_id = h.id";

type HabitRow = (i64, String, Option<String>, Option<String>);

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database. Nothing survives the store being dropped.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_date(s: &str, column: usize) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn read_habit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// Groups joined rows into habits. Rows must arrive ordered by habit id, then log date.
fn fold_habit_rows<I>(rows: I) -> Result<Vec<Habit>>
where
    I: IntoIterator<Item = rusqlite::Result<HabitRow>>,
{
    let mut habits: Vec<Habit> = Vec::new();

    for row in rows {
        let (id, name, color, log_date) = row?;

        if habits.last().is_none_or(|h| h.id != id) {
            habits.push(Habit {
                id,
                name,
                color,
                activity_log: Vec::new(),
            });
        }

        // A habit with no logs joins to a single NULL date; skip it.
        if let (Some(date), Some(habit)) = (log_date, habits.last_mut()) {
            habit.activity_log.push(parse_date(&date, 3)?);
        }
    }

    Ok(habits)
}

fn habit_exists(conn: &Connection, id: i64) -> Result<bool> {
    let found = conn
        .query_row("SELECT 1 FROM habits WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Habit operations

    fn list_habits(&self) -> Result<Vec<Habit>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{SELECT_HABITS_WITH_LOGS} ORDER BY h.id, l.log_date"
        ))?;

        let rows = stmt.query_map([], read_habit_row)?;
        fold_habit_rows(rows)
    }

    fn get_habit(&self, id: i64) -> Result<Option<Habit>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{SELECT_HABITS_WITH_LOGS} WHERE h.id = ?1 ORDER BY l.log_date"
        ))?;

        let rows = stmt.query_map(params![id], read_habit_row)?;
        Ok(fold_habit_rows(rows)?.into_iter().next())
    }

    fn create_habit(&self, habit: &NewHabit) -> Result<Habit> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO habits (name, color) VALUES (?1, ?2)",
            params![habit.name, habit.color],
        )?;

        Ok(Habit {
            id: conn.last_insert_rowid(),
            name: habit.name.clone(),
            color: habit.color.clone(),
            activity_log: Vec::new(),
        })
    }

    fn update_habit(&self, id: i64, changes: &HabitChanges) -> Result<bool> {
        let mut assignments: Vec<(&str, &dyn ToSql)> = Vec::new();
        if let Some(name) = &changes.name {
            assignments.push(("name", name as &dyn ToSql));
        }
        if let Some(color) = &changes.color {
            assignments.push(("color", color as &dyn ToSql));
        }
        if assignments.is_empty() {
            return Err(Error::validation("No fields provided to update"));
        }

        let set_clause = assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE habits SET {set_clause} WHERE id = ?{}",
            assignments.len() + 1
        );

        let mut values: Vec<&dyn ToSql> = assignments.into_iter().map(|(_, v)| v).collect();
        values.push(&id);

        let rows = self.conn().execute(&sql, values.as_slice())?;
        Ok(rows > 0)
    }

    fn delete_habit(&self, id: i64) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM activity_logs WHERE habit_id = ?1",
            params![id],
        )?;
        let rows = tx.execute("DELETE FROM habits WHERE id = ?1", params![id])?;

        tx.commit()?;
        Ok(rows > 0)
    }

    // Activity log operations

    fn list_activity_entries(&self, habit_id: i64) -> Result<Vec<ActivityLogEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, log_date FROM activity_logs
             WHERE habit_id = ?1 ORDER BY log_date",
        )?;

        let rows = stmt.query_map(params![habit_id], |row| {
            Ok(ActivityLogEntry {
                id: row.get(0)?,
                habit_id: row.get(1)?,
                log_date: parse_date(&row.get::<_, String>(2)?, 2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn replace_activity_log(&self, habit_id: i64, dates: &[NaiveDate]) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        if !habit_exists(&tx, habit_id)? {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM activity_logs WHERE habit_id = ?1",
            params![habit_id],
        )?;

        {
            let mut stmt =
                tx.prepare("INSERT INTO activity_logs (habit_id, log_date) VALUES (?1, ?2)")?;
            for date in dates {
                stmt.execute(params![habit_id, format_date(date)])?;
            }
        }

        tx.commit()?;
        Ok(true)
    }
}
