mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::*;
use crate::store::{HabitStore, StoreError, StoreResult};

/// SQLite-backed habit store.
///
/// Cloning is cheap and shares the underlying connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open from a connection string: `:memory:`, a plain path, or a
    /// `sqlite://`-prefixed path.
    pub fn open_url(url: &str) -> Result<Self> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if path == ":memory:" {
            Self::open_memory()
        } else {
            Self::open(PathBuf::from(path))
        }
    }

    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::ensure_schema(&conn)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

/// `<platform data dir>/habits.db`, e.g. `~/.local/share/habit-tracker/habits.db`.
pub fn default_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "habit-tracker")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("habits.db"))
}

impl HabitStore for Database {
    fn create(&self, input: CreateHabitInput) -> StoreResult<Habit> {
        let conn = self.lock()?;
        let id: i64 = conn.query_row(
            "INSERT INTO habits (name, description, completed) VALUES (?, ?, 0) RETURNING id",
            (&input.name, &input.description),
            |row| row.get(0),
        )?;

        tracing::debug!(id, "inserted habit");
        Ok(Habit {
            id,
            name: input.name,
            description: input.description,
            completed: false,
        })
    }

    fn list(&self) -> StoreResult<Vec<Habit>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, name, description, completed FROM habits ORDER BY id")?;

        let habits = stmt
            .query_map([], habit_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(habits)
    }

    fn get(&self, id: i64) -> StoreResult<Option<Habit>> {
        let conn = self.lock()?;
        let habit = conn
            .query_row(
                "SELECT id, name, description, completed FROM habits WHERE id = ?",
                [id],
                habit_from_row,
            )
            .optional()?;
        Ok(habit)
    }

    fn complete(&self, id: i64) -> StoreResult<Habit> {
        let conn = self.lock()?;
        let updated = conn.execute("UPDATE habits SET completed = 1 WHERE id = ?", [id])?;
        if updated == 0 {
            return Err(StoreError::NotFound(id));
        }

        let habit = conn.query_row(
            "SELECT id, name, description, completed FROM habits WHERE id = ?",
            [id],
            habit_from_row,
        )?;

        tracing::debug!(id, "completed habit");
        Ok(habit)
    }
}

fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        completed: row.get(3)?,
    })
}
