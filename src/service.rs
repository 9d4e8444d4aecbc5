use crate::errors::{ValidationErrors, WorkoutError};
use crate::models::{DateGroup, DisplayEntry, FilterKind, NewWorkout, UpdateWorkout};
use crate::store::WorkoutStore;
use crate::transform::split_sets;
use chrono::NaiveDate;
use futures::future::try_join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Workout operations on top of whichever store was configured at startup.
#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<dyn WorkoutStore>,
}

impl WorkoutService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// The day's entries, expanded to one row per set.
    pub async fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<DisplayEntry>, WorkoutError> {
        let rows = self.store.list_by_date(date).await?;
        Ok(split_sets(&rows))
    }

    pub async fn create(&self, workout: NewWorkout) -> Result<i64, WorkoutError> {
        let id = self.store.insert(&workout).await?;
        info!(id, date = %workout.date, exercise = %workout.exercise, "workout added");
        Ok(id)
    }

    /// Applies an edit. Descriptive fields missing from the edit keep their
    /// stored values.
    pub async fn update(&self, update: UpdateWorkout) -> Result<(), WorkoutError> {
        let id = update.id;
        let current = self
            .store
            .get_summary(id)
            .await?
            .ok_or(WorkoutError::NotFound(id))?;

        let changes = update.resolve(current);
        debug!(id, ?changes, "updating workout");
        if !self.store.update(id, &changes).await? {
            return Err(WorkoutError::NotFound(id));
        }
        info!(id, "workout updated");
        Ok(())
    }

    /// Returns how many rows went away; zero means there was nothing to delete.
    pub async fn delete(&self, id: i64) -> Result<u64, WorkoutError> {
        let removed = self.store.delete(id).await?;
        info!(id, removed, "workout delete");
        Ok(removed)
    }

    /// Matching entries across all dates, one group per date, newest first.
    /// Each group also carries the whole day in set-expanded form.
    pub async fn filter(&self, kind: &str, value: &str) -> Result<Vec<DateGroup>, WorkoutError> {
        let mut errors = ValidationErrors::default();
        if kind.trim().is_empty() {
            errors.push("type", "missing filter parameter");
        }
        if value.trim().is_empty() {
            errors.push("value", "missing filter parameter");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        let kind: FilterKind = kind.parse()?;

        let matches = self.store.filter(kind, value).await?;
        debug!(kind = kind.as_str(), value, matches = matches.len(), "filtered workouts");

        let mut by_date: BTreeMap<NaiveDate, DateGroup> = BTreeMap::new();
        for found in matches {
            let group = by_date.entry(found.entry.date).or_insert_with(|| DateGroup {
                date: found.entry.date,
                workouts: Vec::new(),
                related_ids: found.related_ids.clone(),
                all_workouts: Vec::new(),
            });
            group.workouts.push(found.entry);
        }

        let mut groups: Vec<DateGroup> = by_date.into_values().rev().collect();
        let days = try_join_all(groups.iter().map(|group| self.entries_for_date(group.date))).await?;
        for (group, day) in groups.iter_mut().zip(days) {
            group.all_workouts = day;
        }

        Ok(groups)
    }
}
