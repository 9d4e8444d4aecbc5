use super::{WorkoutStore, sorted_ids};
use crate::errors::WorkoutError;
use crate::models::{FilterKind, FilteredEntry, NewWorkout, WorkoutChanges, WorkoutEntry, WorkoutSummary};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct MemoryData {
    rows: Vec<WorkoutEntry>,
    next_id: i64,
}

/// Keeps rows in process memory, for deployments without a writable disk.
#[derive(Debug)]
pub struct MemoryStore {
    data: Mutex<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// A store holding a couple of demo days so a fresh deployment has
    /// something to show.
    pub fn seeded() -> Self {
        Self::with_rows(demo_rows())
    }

    pub fn with_rows(rows: Vec<WorkoutEntry>) -> Self {
        let next_id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        Self {
            data: Mutex::new(MemoryData { rows, next_id }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<WorkoutEntry>, WorkoutError> {
        let data = self.data.lock().await;
        let mut rows: Vec<_> = data.rows.iter().filter(|row| row.date == date).cloned().collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    async fn insert(&self, workout: &NewWorkout) -> Result<i64, WorkoutError> {
        let mut data = self.data.lock().await;
        let id = data.next_id;
        data.next_id += 1;
        data.rows.push(workout.clone().into_entry(id));
        debug!("memory store inserted workout {id}");
        Ok(id)
    }

    async fn update(&self, id: i64, changes: &WorkoutChanges) -> Result<bool, WorkoutError> {
        let mut data = self.data.lock().await;
        match data.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                changes.apply_to(row);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, WorkoutError> {
        let mut data = self.data.lock().await;
        let before = data.rows.len();
        data.rows.retain(|row| row.id != id);
        Ok((before - data.rows.len()) as u64)
    }

    async fn get_summary(&self, id: i64) -> Result<Option<WorkoutSummary>, WorkoutError> {
        let data = self.data.lock().await;
        Ok(data.rows.iter().find(|row| row.id == id).map(|row| WorkoutSummary {
            category: row.category.clone(),
            exercise: row.exercise.clone(),
            muscle_focus: row.muscle_focus.clone(),
        }))
    }

    async fn filter(&self, kind: FilterKind, value: &str) -> Result<Vec<FilteredEntry>, WorkoutError> {
        let data = self.data.lock().await;
        let mut matches: Vec<FilteredEntry> = data
            .rows
            .iter()
            .filter(|row| kind.matches(row, value))
            .map(|row| FilteredEntry {
                entry: row.clone(),
                related_ids: sorted_ids(
                    data.rows
                        .iter()
                        .filter(|other| other.date == row.date)
                        .map(|other| other.id),
                ),
            })
            .collect();
        matches.sort_by(|a, b| b.entry.date.cmp(&a.entry.date).then(a.entry.id.cmp(&b.entry.id)));
        Ok(matches)
    }
}

fn demo_rows() -> Vec<WorkoutEntry> {
    let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap_or_default();
    let text = |value: &str| Some(value.to_string());
    vec![
        WorkoutEntry {
            id: 1,
            date: day(10),
            category: "Back".into(),
            exercise: "Lat Pullover".into(),
            muscle_focus: text("Lower Back"),
            sets: 3,
            reps: text("6,7,8"),
            weight: text("57.5,52.5,47.5"),
            duration: text("30,30,30"),
            notes: text("Demo workout"),
        },
        WorkoutEntry {
            id: 2,
            date: day(10),
            category: "Back".into(),
            exercise: "Single Arm Rows".into(),
            muscle_focus: text("Mid Back"),
            sets: 3,
            reps: text("6,7,8"),
            weight: text("145,130,115"),
            duration: text("30,30,30"),
            notes: text("Another demo workout"),
        },
        WorkoutEntry {
            id: 3,
            date: day(11),
            category: "Chest".into(),
            exercise: "Bench Press".into(),
            muscle_focus: text("Mid Chest"),
            sets: 3,
            reps: text("8,6,4"),
            weight: text("135,155,175"),
            duration: None,
            notes: text("Progressive overload"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn new_workout(day: u32, category: &str) -> NewWorkout {
        NewWorkout {
            date: date(day),
            category: category.into(),
            exercise: "Deadlift".into(),
            muscle_focus: Some("Lower Back".into()),
            sets: 2,
            reps: "5,5".into(),
            weight: Some("225,245".into()),
            duration: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn seeded_store_continues_ids_after_demo_rows() {
        let store = MemoryStore::seeded();
        let id = store.insert(&new_workout(12, "Legs")).await.unwrap();
        assert_eq!(id, 4);

        let rows = store.list_by_date(date(10)).await.unwrap();
        assert_eq!(rows.iter().map(|row| row.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn delete_counts_removed_rows() {
        let store = MemoryStore::seeded();
        assert_eq!(store.delete(2).await.unwrap(), 1);
        assert_eq!(store.delete(2).await.unwrap(), 0);
        assert!(store.get_summary(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_reports_missing_rows() {
        let store = MemoryStore::new();
        let changes = WorkoutChanges {
            category: "Back".into(),
            exercise: "Rows".into(),
            muscle_focus: None,
            sets: 1,
            reps: "10".into(),
            weight: None,
            duration: None,
            notes: None,
        };
        assert!(!store.update(99, &changes).await.unwrap());
    }

    #[tokio::test]
    async fn filter_orders_newest_date_first_with_related_ids() {
        let store = MemoryStore::seeded();
        store.insert(&new_workout(11, "Back")).await.unwrap();

        let matches = store.filter(FilterKind::Category, "Back").await.unwrap();
        let seen: Vec<_> = matches
            .iter()
            .map(|m| (m.entry.id, m.related_ids.clone()))
            .collect();
        assert_eq!(
            seen,
            vec![(4, vec![3, 4]), (1, vec![1, 2]), (2, vec![1, 2])]
        );
    }
}
