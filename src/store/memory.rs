use std::sync::{Mutex, MutexGuard};

use crate::models::{CreateHabitInput, Habit};

use super::{HabitStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    habits: Vec<Habit>,
    next_id: i64,
}

/// In-process store. A single lock guards the whole collection and is held
/// for the full body of every operation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

impl HabitStore for MemoryStore {
    fn create(&self, input: CreateHabitInput) -> StoreResult<Habit> {
        let mut inner = self.lock()?;
        inner.next_id += 1;

        let habit = Habit {
            id: inner.next_id,
            name: input.name,
            description: input.description,
            completed: false,
        };
        inner.habits.push(habit.clone());

        tracing::debug!(id = habit.id, "created habit");
        Ok(habit)
    }

    fn list(&self) -> StoreResult<Vec<Habit>> {
        Ok(self.lock()?.habits.clone())
    }

    fn get(&self, id: i64) -> StoreResult<Option<Habit>> {
        Ok(self.lock()?.habits.iter().find(|h| h.id == id).cloned())
    }

    fn complete(&self, id: i64) -> StoreResult<Habit> {
        let mut inner = self.lock()?;
        let habit = inner
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StoreError::NotFound(id))?;

        habit.completed = true;
        tracing::debug!(id, "completed habit");
        Ok(habit.clone())
    }
}
