//! Habit storage.
//!
//! [`HabitStore`] is the only thing the HTTP layer knows about. Two backends
//! implement it: [`MemoryStore`] keeps everything in a mutex-guarded `Vec`,
//! and [`crate::db::Database`] persists to a SQLite `habits` table.

mod memory;

use std::sync::Arc;

use thiserror::Error;

use crate::models::{CreateHabitInput, Habit};

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("habit {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("store lock poisoned: {0}")]
    Lock(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Create/list/complete operations over the habit collection.
///
/// Implementations must be safe to share between request tasks; each call
/// is atomic with respect to the others.
pub trait HabitStore: Send + Sync {
    /// Insert a new habit with a fresh id and `completed = false`.
    fn create(&self, input: CreateHabitInput) -> StoreResult<Habit>;

    /// All habits in insertion order. Empty, never an error, when there are none.
    fn list(&self) -> StoreResult<Vec<Habit>>;

    /// Look up a single habit.
    fn get(&self, id: i64) -> StoreResult<Option<Habit>>;

    /// Mark a habit completed. Completing twice is not an error.
    fn complete(&self, id: i64) -> StoreResult<Habit>;
}

/// Shared handle injected into the router.
pub type SharedStore = Arc<dyn HabitStore>;
