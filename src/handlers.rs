use crate::calendar::{parse_date, today};
use crate::errors::{AppError, AppResult};
use crate::habits;
use crate::models::{CreateHabitRequest, DayHabit, DayQuery, DayResponse, Habit, SummaryPoint};
use crate::state::AppState;
use crate::summary::build_summary;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub async fn list_habits(State(state): State<AppState>) -> AppResult<Json<Vec<Habit>>> {
    Ok(Json(habits::list_habits(&state.pool).await?))
}

pub async fn create_habit(
    State(state): State<AppState>,
    payload: Result<Json<CreateHabitRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Habit>)> {
    let Json(payload) = payload.map_err(|rejection| AppError::from_json_rejection(&rejection))?;
    payload.validate()?;

    let habit =
        habits::create_habit(&state.pool, &payload.title, &payload.week_days, today()).await?;
    info!(habit_id = %habit.id, week_days = ?payload.week_days, "habit created");

    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn get_day(
    State(state): State<AppState>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> AppResult<Json<DayResponse>> {
    let Query(query) =
        query.map_err(|rejection| AppError::invalid_field("date", rejection.body_text()))?;
    let raw = query
        .date
        .ok_or_else(|| AppError::invalid_field("date", "is required"))?;
    let date = parse_date(&raw)
        .ok_or_else(|| AppError::invalid_field("date", format!("{raw:?} is not a valid date")))?;

    Ok(Json(habits::day_overview(&state.pool, date).await?))
}

/// Responds with the completion record that existed before the toggle, or
/// `null` when the habit had not been completed yet today.
pub async fn toggle_habit(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Option<DayHabit>>> {
    let Path(raw) = id.map_err(|rejection| AppError::invalid_field("id", rejection.body_text()))?;
    let habit_id = Uuid::parse_str(&raw)
        .map_err(|_| AppError::invalid_field("id", "must be a valid UUID"))?;

    let previous = habits::toggle_habit(&state.pool, habit_id, today()).await?;
    info!(%habit_id, completed = previous.is_none(), "habit toggled");

    Ok(Json(previous))
}

pub async fn get_summary(State(state): State<AppState>) -> AppResult<Json<Vec<SummaryPoint>>> {
    Ok(Json(build_summary(&state.pool).await?))
}
