// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

/// Represents the 'question_attempts' table in the database.
/// One row per answer a learner submitted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAttempt {
    pub id: i64,
    pub user_id: i64,
    pub question_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub question_text: String,

    /// Nullable; grouped under "General" when absent.
    pub topic: Option<String>,
    pub difficulty: String,
    pub is_correct: bool,

    /// Seconds, 0 when the client did not measure it.
    pub response_time: f64,

    /// Stored as a JSON array in the database.
    pub tags: Json<Vec<String>>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub answered_at: DateTime<Utc>,
}

/// DTO for recording a single attempt.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttemptRequest {
    #[validate(length(min = 1, max = 128, message = "questionId must be 1-128 chars"))]
    pub question_id: String,
    #[validate(length(min = 1, max = 128, message = "quizId must be 1-128 chars"))]
    pub quiz_id: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub quiz_title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub question_text: String,
    #[validate(length(max = 100))]
    pub topic: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub difficulty: String,

    pub is_correct: bool,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 86400.0, message = "responseTime must be within 0..=86400 seconds"))]
    pub response_time: f64,

    #[serde(default)]
    #[validate(custom(function = validate_tags))]
    pub tags: Vec<String>,

    /// Milliseconds since epoch; defaults to the server clock when omitted.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub answered_at: Option<DateTime<Utc>>,
}

fn validate_tags(tags: &[String]) -> Result<(), validator::ValidationError> {
    if tags.len() > 20 {
        return Err(validator::ValidationError::new("too_many_tags"));
    }
    for tag in tags {
        if tag.is_empty() || tag.len() > 50 {
            return Err(validator::ValidationError::new("invalid_tag_length"));
        }
    }
    Ok(())
}

/// Query parameters for the per-user review queue.
#[derive(Debug, Deserialize)]
pub struct QueueParams {
    /// Number of items to return (default: 20, max: 100).
    pub limit: Option<i64>,
}
