pub const SCHEMA: &str = r#"
-- Habits being tracked
CREATE TABLE IF NOT EXISTS habits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    color TEXT                    -- free-form, usually a hex color
);

-- One row per day a habit was performed (one-to-many with habits)
CREATE TABLE IF NOT EXISTS activity_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    habit_id INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
    log_date TEXT NOT NULL,       -- YYYY-MM-DD

    UNIQUE(habit_id, log_date)
);

CREATE INDEX IF NOT EXISTS idx_activity_logs_habit ON activity_logs(habit_id);
"#;
