//! Habit tracking REST API.
//!
//! The HTTP layer in [`api`] talks only to the [`store::HabitStore`] trait;
//! [`store::MemoryStore`] and [`db::Database`] are the two backends.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod store;
