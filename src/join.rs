use crate::habits::HabitStore;
use crate::models::{Habit, JoinRow, Record};
use crate::records::RecordStore;

pub const PLACEHOLDER: &str = "-";
pub const DONE: &str = "✅";
pub const NOT_DONE: &str = "❌";

/// One row per habit, paired with the first record in the backend's order
/// that points at it. With several candidates the earliest in the list wins,
/// not the most recent date.
pub fn join_rows(habits: &[Habit], records: &[Record]) -> Vec<JoinRow> {
    habits
        .iter()
        .map(|habit| {
            let record = records.iter().find(|r| r.habit_id == habit.id);
            JoinRow {
                habit_id: habit.id,
                name: or_placeholder(&habit.name),
                description: or_placeholder(&habit.description),
                goal: or_placeholder(habit.frequency.as_str()),
                date: record.map_or_else(|| PLACEHOLDER.to_string(), |r| or_placeholder(&r.date)),
                completed: match record {
                    Some(r) if r.completed => DONE,
                    _ => NOT_DONE,
                },
                notes: record.map_or_else(|| PLACEHOLDER.to_string(), |r| or_placeholder(&r.notes)),
            }
        })
        .collect()
}

fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Memoized combined table. Rebuilt only when a store revision or the
/// external refresh counter differs from the last build.
#[derive(Debug, Default)]
pub struct CombinedView {
    key: Option<(u64, u64, u64)>,
    rows: Vec<JoinRow>,
    builds: u64,
}

impl CombinedView {
    pub fn rows(&mut self, habits: &HabitStore, records: &RecordStore, refresh: u64) -> &[JoinRow] {
        let key = (habits.revision(), records.revision(), refresh);
        if self.key != Some(key) {
            self.rows = join_rows(habits.habits(), records.server_order());
            self.key = Some(key);
            self.builds += 1;
        }
        &self.rows
    }

    /// How many times the rows have been derived.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}
