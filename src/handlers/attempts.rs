// src/handlers/attempts.rs

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::{SqlitePool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::attempt::{QuestionAttempt, QueueParams, RecordAttemptRequest},
    review::{aggregate_by_topic, build_queue, fold_attempts},
};

const ATTEMPT_COLUMNS: &str = "id, user_id, question_id, quiz_id, quiz_title, question_text, \
     topic, difficulty, is_correct, response_time, tags, answered_at";

fn ensure_user_id(user_id: i64) -> Result<(), AppError> {
    if user_id <= 0 {
        return Err(AppError::BadRequest("Invalid user id".to_string()));
    }
    Ok(())
}

/// Loads a user's whole attempt log.
async fn load_attempts(pool: &SqlitePool, user_id: i64) -> Result<Vec<QuestionAttempt>, AppError> {
    let sql = format!(
        "SELECT {} FROM question_attempts WHERE user_id = ? ORDER BY id",
        ATTEMPT_COLUMNS
    );

    sqlx::query_as::<_, QuestionAttempt>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load attempts for user {}: {:?}", user_id, e);
            AppError::InternalServerError(e.to_string())
        })
}

/// Records a single answer in the user's attempt log.
///
/// * Validates the payload.
/// * `answered_at` falls back to the server clock.
/// * Returns the stored row with status 201.
pub async fn record_attempt(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
    payload: Result<Json<RecordAttemptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ensure_user_id(user_id)?;
    let Json(req) = payload?;
    req.validate()?;

    let topic = req.topic.filter(|t| !t.trim().is_empty());
    let answered_at = req.answered_at.unwrap_or_else(Utc::now);

    let sql = format!(
        r#"
        INSERT INTO question_attempts
            (user_id, question_id, quiz_id, quiz_title, question_text,
             topic, difficulty, is_correct, response_time, tags, answered_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        ATTEMPT_COLUMNS
    );

    let attempt = sqlx::query_as::<_, QuestionAttempt>(&sql)
        .bind(user_id)
        .bind(&req.question_id)
        .bind(&req.quiz_id)
        .bind(&req.quiz_title)
        .bind(&req.question_text)
        .bind(topic)
        .bind(&req.difficulty)
        .bind(req.is_correct)
        .bind(req.response_time)
        .bind(SqlJson(req.tags))
        .bind(answered_at)
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert attempt: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    tracing::info!(
        "Recorded attempt {} for user {} on question {}",
        attempt.id,
        user_id,
        attempt.question_id
    );

    Ok((StatusCode::CREATED, Json(attempt)))
}

/// Lists one performance record per question, folded from the attempt log.
pub async fn list_performances(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_user_id(user_id)?;
    let attempts = load_attempts(&pool, user_id).await?;

    Ok(Json(fold_attempts(&attempts)))
}

/// Builds the user's review queue from their stored attempts.
pub async fn user_review_queue(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Path(user_id): Path<i64>,
    Query(params): Query<QueueParams>,
) -> Result<impl IntoResponse, AppError> {
    ensure_user_id(user_id)?;
    let limit = config.resolve_limit(params.limit);

    let attempts = load_attempts(&pool, user_id).await?;
    let performances = fold_attempts(&attempts);
    let queue = build_queue(&performances, limit, Utc::now());

    tracing::info!(
        "Review queue for user {}: {} of {} questions",
        user_id,
        queue.len(),
        performances.len()
    );

    Ok(Json(queue))
}

/// Per-topic accuracy across the user's stored attempts.
pub async fn user_topic_accuracy(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_user_id(user_id)?;
    let attempts = load_attempts(&pool, user_id).await?;

    Ok(Json(aggregate_by_topic(&fold_attempts(&attempts))))
}
