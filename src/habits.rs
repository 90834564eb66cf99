use crate::calendar::week_day;
use crate::errors::{AppError, AppResult};
use crate::models::{Day, DayHabit, DayResponse, Habit, WeekdayRule};
use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

const HABIT_COLUMNS: &str = "id, title, created_at";

/// Inserts a habit and its week-day rules in one transaction.
pub async fn create_habit(
    pool: &SqlitePool,
    title: &str,
    week_days: &[i64],
    created_at: NaiveDate,
) -> Result<Habit, sqlx::Error> {
    let habit = Habit {
        id: Uuid::new_v4(),
        title: title.to_string(),
        created_at,
    };

    let mut tx = pool.begin().await?;
    sqlx::query("INSERT INTO habits (id, title, created_at) VALUES (?, ?, ?)")
        .bind(habit.id)
        .bind(&habit.title)
        .bind(habit.created_at)
        .execute(&mut *tx)
        .await?;

    let rules = week_days.iter().map(|&week_day| WeekdayRule {
        id: Uuid::new_v4(),
        habit_id: habit.id,
        week_day,
    });
    for rule in rules {
        sqlx::query("INSERT INTO habit_week_days (id, habit_id, week_day) VALUES (?, ?, ?)")
            .bind(rule.id)
            .bind(rule.habit_id)
            .bind(rule.week_day)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(habit)
}

pub async fn list_habits(pool: &SqlitePool) -> Result<Vec<Habit>, sqlx::Error> {
    let query = format!("SELECT {HABIT_COLUMNS} FROM habits ORDER BY created_at, title");
    sqlx::query_as::<_, Habit>(&query).fetch_all(pool).await
}

/// Habits that can be done on `date`, plus the ones already completed.
pub async fn day_overview(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<DayResponse, sqlx::Error> {
    let query = format!(
        "SELECT {HABIT_COLUMNS} FROM habits h \
         WHERE h.created_at <= ? \
           AND EXISTS ( \
               SELECT 1 FROM habit_week_days w \
               WHERE w.habit_id = h.id AND w.week_day = ? \
           ) \
         ORDER BY h.created_at, h.title"
    );
    let possible_habits = sqlx::query_as::<_, Habit>(&query)
        .bind(date)
        .bind(week_day(date))
        .fetch_all(pool)
        .await?;

    let completed_habits = sqlx::query_scalar::<_, Uuid>(
        "SELECT dh.habit_id FROM day_habits dh \
         JOIN days d ON d.id = dh.day_id \
         WHERE d.date = ?",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(DayResponse {
        possible_habits,
        completed_habits,
    })
}

/// Returns the `days` row for `date`, creating it if needed.
///
/// The insert is a no-op when another writer got there first, so concurrent
/// callers always end up reading the same row.
pub async fn get_or_create_day(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<Day, sqlx::Error> {
    sqlx::query("INSERT INTO days (id, date) VALUES (?, ?) ON CONFLICT (date) DO NOTHING")
        .bind(Uuid::new_v4())
        .bind(date)
        .execute(&mut *conn)
        .await?;

    sqlx::query_as::<_, Day>("SELECT id, date FROM days WHERE date = ?")
        .bind(date)
        .fetch_one(&mut *conn)
        .await
}

/// Flips the completion of `habit_id` on `date`.
///
/// Returns the completion record as it was before the flip: `Some` when the
/// habit was completed (and is now cleared), `None` when it was not.
pub async fn toggle_habit(
    pool: &SqlitePool,
    habit_id: Uuid,
    date: NaiveDate,
) -> AppResult<Option<DayHabit>> {
    let mut tx = pool.begin().await?;
    let day = get_or_create_day(&mut *tx, date).await?;

    let removed = sqlx::query_as::<_, DayHabit>(
        "DELETE FROM day_habits WHERE day_id = ? AND habit_id = ? \
         RETURNING id, day_id, habit_id",
    )
    .bind(day.id)
    .bind(habit_id)
    .fetch_optional(&mut *tx)
    .await?;

    if removed.is_none() {
        sqlx::query("INSERT INTO day_habits (id, day_id, habit_id) VALUES (?, ?, ?)")
            .bind(Uuid::new_v4())
            .bind(day.id)
            .bind(habit_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| classify_insert_error(err, habit_id))?;
    }
    tx.commit().await?;

    Ok(removed)
}

fn classify_insert_error(err: sqlx::Error, habit_id: Uuid) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => AppError::NotFound {
            entity: "habit",
            id: habit_id,
        },
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
            format!("habit {habit_id} was toggled concurrently, retry the request"),
        ),
        _ => AppError::Store(err),
    }
}
