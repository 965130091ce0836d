use serde::{Deserialize, Deserializer, Serialize};

/// A habit being tracked.
///
/// The id is assigned by the store on creation and never changes afterwards.
/// `completed` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Input for creating a new habit.
///
/// Unknown fields such as `id` or `completed` are accepted and dropped, the
/// store decides both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabitInput {
    pub name: String,
    /// Absent and `null` both mean no description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl CreateHabitInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
