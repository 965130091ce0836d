use std::sync::Arc;

use habit_tracker::db::Database;
use habit_tracker::models::*;
use habit_tracker::store::{HabitStore, MemoryStore, SharedStore, StoreError};
use speculate2::speculate;

fn sqlite_store() -> SharedStore {
    let db = Database::open_memory().expect("Failed to create in-memory database");
    db.ensure_schema().expect("Failed to create schema");
    Arc::new(db)
}

fn exercise() -> CreateHabitInput {
    CreateHabitInput::new("Exercise", "Daily exercise routine")
}

// Contract checks shared by both backends.

fn creates_active_habit_visible_in_list(store: &dyn HabitStore) {
    let before = store.list().expect("Query failed");

    let habit = store.create(exercise()).expect("Failed to create");

    assert_eq!(habit.name, "Exercise");
    assert_eq!(habit.description, "Daily exercise routine");
    assert!(!habit.completed);

    let after = store.list().expect("Query failed");
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.iter().filter(|h| h.id == habit.id).count(), 1);
    assert!(before.iter().all(|h| h.id != habit.id));
}

fn assigns_unique_ids(store: &dyn HabitStore) {
    let a = store.create(CreateHabitInput::new("A", "")).expect("Failed to create");
    let b = store.create(CreateHabitInput::new("B", "")).expect("Failed to create");
    let c = store.create(CreateHabitInput::new("C", "")).expect("Failed to create");

    assert!(a.id < b.id && b.id < c.id);
}

fn completes_idempotently(store: &dyn HabitStore) {
    let habit = store.create(exercise()).expect("Failed to create");

    let first = store.complete(habit.id).expect("Failed to complete");
    let second = store.complete(habit.id).expect("Failed to complete twice");

    assert!(first.completed);
    assert_eq!(first, second);
    assert_eq!(first.name, habit.name);

    let stored = store.get(habit.id).expect("Query failed").expect("Habit missing");
    assert!(stored.completed);
}

fn complete_leaves_other_habits_alone(store: &dyn HabitStore) {
    let target = store.create(CreateHabitInput::new("Target", "")).expect("Failed to create");
    let other = store.create(CreateHabitInput::new("Other", "")).expect("Failed to create");

    store.complete(target.id).expect("Failed to complete");

    let other = store.get(other.id).expect("Query failed").expect("Habit missing");
    assert!(!other.completed);
}

fn unknown_id_is_not_found(store: &dyn HabitStore) {
    store.create(exercise()).expect("Failed to create");

    match store.complete(999) {
        Err(StoreError::NotFound(id)) => assert_eq!(id, 999),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(store.get(999).expect("Query failed").is_none());
}

speculate! {
    describe "memory store" {
        before {
            let store = MemoryStore::new();
        }

        it "returns an empty list when no habits exist" {
            assert!(store.list().expect("Query failed").is_empty());
        }

        it "creates an active habit visible in list" {
            creates_active_habit_visible_in_list(&store);
        }

        it "assigns ids from one upwards" {
            assigns_unique_ids(&store);
            let ids: Vec<_> = store.list().unwrap().iter().map(|h| h.id).collect();
            assert_eq!(ids, vec![1, 2, 3]);
        }

        it "completes idempotently" {
            completes_idempotently(&store);
        }

        it "completes only the requested habit" {
            complete_leaves_other_habits_alone(&store);
        }

        it "reports unknown ids as not found" {
            unknown_id_is_not_found(&store);
        }
    }

    describe "sqlite store" {
        before {
            let store = sqlite_store();
        }

        it "returns an empty list when no habits exist" {
            assert!(store.list().expect("Query failed").is_empty());
        }

        it "creates an active habit visible in list" {
            creates_active_habit_visible_in_list(store.as_ref());
        }

        it "assigns increasing ids" {
            assigns_unique_ids(store.as_ref());
        }

        it "completes idempotently" {
            completes_idempotently(store.as_ref());
        }

        it "completes only the requested habit" {
            complete_leaves_other_habits_alone(store.as_ref());
        }

        it "reports unknown ids as not found" {
            unknown_id_is_not_found(store.as_ref());
        }
    }

    describe "sqlite persistence" {
        before {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nested").join("habits.db");
        }

        it "keeps habits and completion across reopen" {
            let id = {
                let db = Database::open(path.clone()).expect("Failed to open");
                db.ensure_schema().expect("Failed to create schema");
                let habit = db.create(exercise()).expect("Failed to create");
                db.complete(habit.id).expect("Failed to complete");
                habit.id
            };

            let db = Database::open(path.clone()).expect("Failed to reopen");
            db.ensure_schema().expect("Failed to create schema");

            let habits = db.list().expect("Query failed");
            assert_eq!(habits.len(), 1);
            assert_eq!(habits[0].id, id);
            assert!(habits[0].completed);
        }

        it "never reuses ids after reopen" {
            let first = {
                let db = Database::open(path.clone()).expect("Failed to open");
                db.ensure_schema().expect("Failed to create schema");
                db.create(exercise()).expect("Failed to create")
            };

            let db = Database::open_url(&format!("sqlite://{}", path.display()))
                .expect("Failed to reopen via url");
            let second = db.create(exercise()).expect("Failed to create");

            assert!(second.id > first.id);
        }

        it "shares one connection between clones" {
            let db = Database::open(path.clone()).expect("Failed to open");
            db.ensure_schema().expect("Failed to create schema");
            let clone = db.clone();

            clone.create(exercise()).expect("Failed to create");

            assert_eq!(db.list().expect("Query failed").len(), 1);
        }
    }
}
