use super::{WorkoutStore, sorted_ids};
use crate::errors::WorkoutError;
use crate::models::{FilterKind, FilteredEntry, NewWorkout, WorkoutChanges, WorkoutEntry, WorkoutSummary};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

const ENTRY_COLUMNS: &str =
    "id, date, category, exercise, muscle_focus, sets, reps, weight, duration, notes";

pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct FilterRow {
    #[sqlx(flatten)]
    entry: WorkoutEntry,
    related_ids: Option<String>,
}

impl SqliteStore {
    pub async fn open(path: &Path) -> Result<Self, WorkoutError> {
        let newly_created = !path.exists();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(WorkoutError::storage("open database"))?;

        if newly_created {
            info!("initialized new database: {}", path.display());
        } else {
            info!("opened existing database: {}", path.display());
        }

        Self::from_pool(pool).await
    }

    /// A private database living as long as the store. One connection only,
    /// since every `:memory:` connection is its own database.
    pub async fn in_memory() -> Result<Self, WorkoutError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(WorkoutError::storage("open database"))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, WorkoutError> {
        create_schema(&pool).await?;
        Ok(Self { pool })
    }
}

async fn create_schema(pool: &SqlitePool) -> Result<(), WorkoutError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS workouts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            exercise TEXT NOT NULL,
            muscle_focus TEXT,
            sets INTEGER NOT NULL,
            reps TEXT,
            weight TEXT,
            duration TEXT,
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(WorkoutError::storage("create schema"))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date)")
        .execute(pool)
        .await
        .map_err(WorkoutError::storage("create schema"))?;

    Ok(())
}

fn parse_related_ids(raw: Option<&str>) -> Vec<i64> {
    sorted_ids(
        raw.unwrap_or_default()
            .split(',')
            .filter_map(|id| id.trim().parse().ok()),
    )
}

#[async_trait]
impl WorkoutStore for SqliteStore {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<WorkoutEntry>, WorkoutError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM workouts WHERE date = ? ORDER BY id");
        sqlx::query_as::<_, WorkoutEntry>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(WorkoutError::storage("list workouts by date"))
    }

    async fn insert(&self, workout: &NewWorkout) -> Result<i64, WorkoutError> {
        let result = sqlx::query(
            r#"
            INSERT INTO workouts (date, category, exercise, muscle_focus, sets, reps, weight, duration, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(workout.date)
        .bind(&workout.category)
        .bind(&workout.exercise)
        .bind(&workout.muscle_focus)
        .bind(workout.sets)
        .bind(&workout.reps)
        .bind(&workout.weight)
        .bind(&workout.duration)
        .bind(&workout.notes)
        .execute(&self.pool)
        .await
        .map_err(WorkoutError::storage("insert workout"))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, changes: &WorkoutChanges) -> Result<bool, WorkoutError> {
        let result = sqlx::query(
            r#"
            UPDATE workouts
            SET category = ?, exercise = ?, muscle_focus = ?, sets = ?, reps = ?, weight = ?, duration = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.category)
        .bind(&changes.exercise)
        .bind(&changes.muscle_focus)
        .bind(changes.sets)
        .bind(&changes.reps)
        .bind(&changes.weight)
        .bind(&changes.duration)
        .bind(&changes.notes)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(WorkoutError::storage("update workout"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<u64, WorkoutError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(WorkoutError::storage("delete workout"))?;
        Ok(result.rows_affected())
    }

    async fn get_summary(&self, id: i64) -> Result<Option<WorkoutSummary>, WorkoutError> {
        sqlx::query_as::<_, WorkoutSummary>(
            "SELECT category, exercise, muscle_focus FROM workouts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(WorkoutError::storage("get workout summary"))
    }

    async fn filter(&self, kind: FilterKind, value: &str) -> Result<Vec<FilteredEntry>, WorkoutError> {
        let sql = format!(
            r#"
            SELECT w.id, w.date, w.category, w.exercise, w.muscle_focus, w.sets,
                   w.reps, w.weight, w.duration, w.notes,
                   (SELECT GROUP_CONCAT(w2.id) FROM workouts w2 WHERE w2.date = w.date) AS related_ids
            FROM workouts w
            WHERE w.{column} = ?
            ORDER BY w.date DESC, w.id
            "#,
            column = kind.column(),
        );

        let rows = sqlx::query_as::<_, FilterRow>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(WorkoutError::storage("filter workouts"))?;

        Ok(rows
            .into_iter()
            .map(|row| FilteredEntry {
                related_ids: parse_related_ids(row.related_ids.as_deref()),
                entry: row.entry,
            })
            .collect())
    }
}
