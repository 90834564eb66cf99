use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub title: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeekdayRule {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub week_day: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Day {
    pub id: Uuid,
    pub date: NaiveDate,
}

/// A habit completed on a day. The row existing is what "completed" means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DayHabit {
    pub id: Uuid,
    pub day_id: Uuid,
    pub habit_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[serde(rename = "weekDays")]
    #[validate(custom(function = "validate_week_days"))]
    pub week_days: Vec<i64>,
}

fn validate_week_days(days: &[i64]) -> Result<(), ValidationError> {
    if days.iter().all(|day| (0..=6).contains(day)) {
        return Ok(());
    }
    let mut error = ValidationError::new("range");
    error.message = Some("every week day must be between 0 and 6".into());
    Err(error)
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    #[serde(rename = "possibleHabits")]
    pub possible_habits: Vec<Habit>,
    #[serde(rename = "completedHabits")]
    pub completed_habits: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SummaryPoint {
    pub id: Uuid,
    pub date: NaiveDate,
    pub completed: f64,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, week_days: Vec<i64>) -> CreateHabitRequest {
        CreateHabitRequest {
            title: title.to_string(),
            week_days,
        }
    }

    #[test]
    fn accepts_duplicates_and_empty_week_days() {
        assert!(request("Read", vec![1, 1, 6]).validate().is_ok());
        assert!(request("Read", vec![]).validate().is_ok());
    }

    #[test]
    fn rejects_empty_title() {
        let errors = request("", vec![1]).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn rejects_out_of_range_week_days() {
        for bad in [vec![7], vec![-1], vec![0, 3, 9]] {
            let errors = request("Run", bad).validate().unwrap_err();
            let fields = errors.field_errors();
            assert_eq!(fields.len(), 1);
            assert!(!fields.contains_key("title"));
        }
    }

    #[test]
    fn create_request_uses_camel_case_week_days() {
        let parsed: CreateHabitRequest =
            serde_json::from_str(r#"{"title":"Drink water","weekDays":[0,6]}"#).unwrap();
        assert_eq!(parsed.week_days, vec![0, 6]);

        let missing = serde_json::from_str::<CreateHabitRequest>(r#"{"title":"x"}"#);
        assert!(missing.is_err());
    }
}
