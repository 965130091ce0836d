use anyhow::{Context, Result};
use rusqlite::Connection;

const HABITS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS habits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    completed BOOLEAN NOT NULL DEFAULT 0
)";

/// Create the `habits` table when it does not exist yet.
///
/// An existing table is left untouched; there is no versioned migration step.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(HABITS_TABLE)
        .context("Failed to create habits table")?;
    Ok(())
}
