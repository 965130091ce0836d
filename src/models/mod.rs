//! Domain models for the habit tracker.
//!
//! - [`Habit`]: a tracked habit. Created active, completed at most once, never deleted.
//! - [`CreateHabitInput`]: request body for creating a habit.

mod habit;

pub use habit::*;
