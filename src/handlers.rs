use crate::errors::{ApiError, AppError, WorkoutError};
use crate::models::{
    DayResponse, DeleteForm, FilterQuery, FilterResponse, HomeQuery, UpdateForm, WorkoutForm,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use tracing::{error, warn};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, AppError> {
    let Some(date) = query.parsed_date() else {
        return Ok(Html(render_index(None, &[])));
    };

    let entries = state
        .workouts
        .entries_for_date(date)
        .await
        .map_err(|err| form_failure(err, "Error fetching workouts"))?;
    Ok(Html(render_index(Some(date), &entries)))
}

pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<Json<DayResponse>, ApiError> {
    let date = query.parsed_date().ok_or_else(|| {
        ApiError(AppError::bad_request("date must be a calendar date (YYYY-MM-DD)"))
    })?;

    let workouts = state.workouts.entries_for_date(date).await.map_err(api_failure)?;
    Ok(Json(DayResponse { date, workouts }))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Form(form): Form<WorkoutForm>,
) -> Result<Response, AppError> {
    let workout = form
        .validate()
        .map_err(|errors| form_failure(errors.into(), "Error adding workout"))?;
    let date = workout.date;

    state
        .workouts
        .create(workout)
        .await
        .map_err(|err| form_failure(err, "Error adding workout"))?;
    Ok(redirect_to_day(Some(date)))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Form(form): Form<UpdateForm>,
) -> Result<Response, AppError> {
    let update = form
        .validate()
        .map_err(|errors| form_failure(errors.into(), "Error updating workout"))?;
    let date = update.date;

    state
        .workouts
        .update(update)
        .await
        .map_err(|err| form_failure(err, "Error updating workout"))?;
    Ok(redirect_to_day(date))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let command = form
        .validate()
        .map_err(|errors| form_failure(errors.into(), "Error deleting workout"))?;

    let removed = state
        .workouts
        .delete(command.id)
        .await
        .map_err(|err| form_failure(err, "Error deleting workout"))?;

    if removed == 0 {
        let message = format!("No workout deleted. ID {} might not exist.", command.id);
        return Ok((StatusCode::OK, message).into_response());
    }
    Ok(redirect_to_day(command.date))
}

pub async fn filter_workouts(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FilterResponse>, ApiError> {
    let kind = query.kind.as_deref().unwrap_or_default();
    let value = query.value.as_deref().unwrap_or_default();

    let workouts_by_date = state.workouts.filter(kind, value).await.map_err(api_failure)?;
    Ok(Json(FilterResponse { workouts_by_date }))
}

/// Redirect-after-write back to the day the entry belongs to.
fn redirect_to_day(date: Option<NaiveDate>) -> Response {
    let location = match date {
        Some(date) => format!("/?date={date}"),
        None => "/".to_string(),
    };
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn form_failure(err: WorkoutError, action: &str) -> AppError {
    if err.is_storage() {
        error!("{action}: {err}");
    } else {
        warn!("{action}: {err}");
    }
    AppError::form(&err, action)
}

fn api_failure(err: WorkoutError) -> ApiError {
    if err.is_storage() {
        error!("api request failed: {err}");
    }
    ApiError::from(err)
}
