use crate::models::SummaryPoint;
use sqlx::SqlitePool;

/// Completed vs possible habit counts for every recorded day.
///
/// `amount` counts week-day rules rather than distinct habits, so a habit
/// listed twice for the same week day counts twice.
const SUMMARY_QUERY: &str = "\
    SELECT
        d.id,
        d.date,
        (
            SELECT CAST(COUNT(*) AS REAL)
            FROM day_habits dh
            WHERE dh.day_id = d.id
        ) AS completed,
        (
            SELECT CAST(COUNT(*) AS REAL)
            FROM habit_week_days hwd
            JOIN habits h ON h.id = hwd.habit_id
            WHERE hwd.week_day = CAST(strftime('%w', d.date) AS INTEGER)
              AND h.created_at <= d.date
        ) AS amount
    FROM days d
    ORDER BY d.date";

pub async fn build_summary(pool: &SqlitePool) -> Result<Vec<SummaryPoint>, sqlx::Error> {
    sqlx::query_as::<_, SummaryPoint>(SUMMARY_QUERY)
        .fetch_all(pool)
        .await
}
