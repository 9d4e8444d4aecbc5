use crate::errors::{ValidationErrors, WorkoutError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound on sets per entry. Each set becomes a display row.
pub const MAX_SETS: i64 = 100;

const SETS_MESSAGE: &str = "must be an integer between 1 and 100";

/// A stored row of the `workouts` table.
///
/// `reps`, `weight` and `duration` hold one comma-separated value per set.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct WorkoutEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub exercise: String,
    pub muscle_focus: Option<String>,
    pub sets: i64,
    pub reps: Option<String>,
    pub weight: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub category: String,
    pub exercise: String,
    pub muscle_focus: Option<String>,
    pub sets: i64,
    pub reps: String,
    pub weight: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

impl NewWorkout {
    pub fn into_entry(self, id: i64) -> WorkoutEntry {
        WorkoutEntry {
            id,
            date: self.date,
            category: self.category,
            exercise: self.exercise,
            muscle_focus: self.muscle_focus,
            sets: self.sets,
            reps: Some(self.reps),
            weight: self.weight,
            duration: self.duration,
            notes: self.notes,
        }
    }
}

/// The descriptive columns an update falls back to when the form omits them.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct WorkoutSummary {
    pub category: String,
    pub exercise: String,
    pub muscle_focus: Option<String>,
}

/// Fully resolved column values written by an update.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutChanges {
    pub category: String,
    pub exercise: String,
    pub muscle_focus: Option<String>,
    pub sets: i64,
    pub reps: String,
    pub weight: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

impl WorkoutChanges {
    pub fn apply_to(&self, entry: &mut WorkoutEntry) {
        entry.category = self.category.clone();
        entry.exercise = self.exercise.clone();
        entry.muscle_focus = self.muscle_focus.clone();
        entry.sets = self.sets;
        entry.reps = Some(self.reps.clone());
        entry.weight = self.weight.clone();
        entry.duration = self.duration.clone();
        entry.notes = self.notes.clone();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWorkout {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub exercise: Option<String>,
    pub muscle_focus: Option<String>,
    pub sets: i64,
    pub reps: String,
    pub weight: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

impl UpdateWorkout {
    pub fn resolve(self, current: WorkoutSummary) -> WorkoutChanges {
        WorkoutChanges {
            category: self.category.unwrap_or(current.category),
            exercise: self.exercise.unwrap_or(current.exercise),
            muscle_focus: self.muscle_focus.or(current.muscle_focus),
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            duration: self.duration,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Category,
    Movement,
    MuscleFocus,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Movement => "movement",
            Self::MuscleFocus => "muscle-focus",
        }
    }

    /// Column matched by this kind. Only ever one of these literals reaches SQL.
    pub fn column(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Movement => "exercise",
            Self::MuscleFocus => "muscle_focus",
        }
    }

    pub fn matches(self, entry: &WorkoutEntry, value: &str) -> bool {
        match self {
            Self::Category => entry.category == value,
            Self::Movement => entry.exercise == value,
            Self::MuscleFocus => entry.muscle_focus.as_deref() == Some(value),
        }
    }
}

impl FromStr for FilterKind {
    type Err = WorkoutError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "category" => Ok(Self::Category),
            "movement" => Ok(Self::Movement),
            "muscle-focus" => Ok(Self::MuscleFocus),
            other => Err(WorkoutError::UnknownFilterKind(other.to_string())),
        }
    }
}

/// A filter match plus the ids of every entry logged on the same date.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredEntry {
    pub entry: WorkoutEntry,
    pub related_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySet {
    #[serde(rename = "setRowId")]
    pub set_row_id: String,
    #[serde(rename = "originalId")]
    pub original_id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub exercise: String,
    pub muscle_focus: Option<String>,
    #[serde(rename = "setNumber")]
    pub set_number: usize,
    pub reps: String,
    pub weight: String,
    pub duration: String,
    pub notes: Option<String>,
    pub last: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub exercise: String,
    pub muscle_focus: Option<String>,
    #[serde(rename = "setsCount")]
    pub sets_count: i64,
    #[serde(rename = "setRows")]
    pub set_rows: Vec<DisplaySet>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub workouts: Vec<WorkoutEntry>,
    /// Sent as strings, the form `GROUP_CONCAT` yields them in.
    #[serde(rename = "relatedIds", serialize_with = "ids_as_strings")]
    pub related_ids: Vec<i64>,
    #[serde(rename = "allWorkouts")]
    pub all_workouts: Vec<DisplayEntry>,
}

fn ids_as_strings<S: serde::Serializer>(ids: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(ids.iter().map(i64::to_string))
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    #[serde(rename = "workoutsByDate")]
    pub workouts_by_date: Vec<DateGroup>,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub workouts: Vec<DisplayEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub date: Option<String>,
}

impl HomeQuery {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
}

/// Body of `POST /add-workout`. Every field is optional here so that missing
/// fields surface as validation messages rather than extractor rejections.
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutForm {
    pub date: Option<String>,
    pub category: Option<String>,
    pub exercise: Option<String>,
    pub muscle_focus: Option<String>,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub weight: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

impl WorkoutForm {
    pub fn validate(self) -> Result<NewWorkout, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let date = self.date.as_deref().and_then(parse_date);
        if date.is_none() {
            errors.push("date", "must be a calendar date (YYYY-MM-DD)");
        }
        let category = present(self.category);
        if category.is_none() {
            errors.push("category", "must not be empty");
        }
        let exercise = present(self.exercise);
        if exercise.is_none() {
            errors.push("exercise", "must not be empty");
        }
        let sets = parse_sets(self.sets.as_deref());
        if sets.is_none() {
            errors.push("sets", SETS_MESSAGE);
        }
        let reps = present(self.reps);
        if reps.is_none() {
            errors.push("reps", "must not be empty");
        }

        match (date, category, exercise, sets, reps) {
            (Some(date), Some(category), Some(exercise), Some(sets), Some(reps)) => Ok(NewWorkout {
                date,
                category,
                exercise,
                muscle_focus: present(self.muscle_focus),
                sets,
                reps,
                weight: present(self.weight),
                duration: present(self.duration),
                notes: present(self.notes),
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `POST /update-workout`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(rename = "originalId")]
    pub original_id: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub exercise: Option<String>,
    pub muscle_focus: Option<String>,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub weight: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

impl UpdateForm {
    pub fn validate(self) -> Result<UpdateWorkout, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let id = parse_id(self.original_id.as_deref());
        if id.is_none() {
            errors.push("originalId", "must be an entry id");
        }
        let sets = parse_sets(self.sets.as_deref());
        if sets.is_none() {
            errors.push("sets", SETS_MESSAGE);
        }
        let reps = present(self.reps);
        if reps.is_none() {
            errors.push("reps", "must not be empty");
        }

        match (id, sets, reps) {
            (Some(id), Some(sets), Some(reps)) => Ok(UpdateWorkout {
                id,
                date: self.date.as_deref().and_then(parse_date),
                category: present(self.category),
                exercise: present(self.exercise),
                muscle_focus: present(self.muscle_focus),
                sets,
                reps,
                weight: present(self.weight),
                duration: present(self.duration),
                notes: present(self.notes),
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `POST /delete-workout`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "originalId")]
    pub original_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteWorkout {
    pub id: i64,
    pub date: Option<NaiveDate>,
}

impl DeleteForm {
    pub fn validate(self) -> Result<DeleteWorkout, ValidationErrors> {
        match parse_id(self.original_id.as_deref()) {
            Some(id) => Ok(DeleteWorkout {
                id,
                date: self.date.as_deref().and_then(parse_date),
            }),
            None => {
                let mut errors = ValidationErrors::default();
                errors.push("originalId", "must be an entry id");
                Err(errors)
            }
        }
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_sets(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|text| text.trim().parse::<i64>().ok())
        .filter(|sets| (1..=MAX_SETS).contains(sets))
}

fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|text| text.trim().parse::<i64>().ok())
}
