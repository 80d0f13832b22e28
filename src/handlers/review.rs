// src/handlers/review.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::review::{BuildQueueRequest, QuestionPerformance, TopicAccuracyRequest},
    review::{aggregate_by_topic, build_queue},
};

/// Rejects records whose counters contradict each other.
/// The scheduler itself tolerates them; the API does not.
pub(crate) fn ensure_consistent(performances: &[QuestionPerformance]) -> Result<(), AppError> {
    if let Some(bad) = performances.iter().find(|p| !p.counts_consistent()) {
        return Err(AppError::BadRequest(format!(
            "Question '{}' has timesCorrect ({}) greater than timesAnswered ({})",
            bad.question_id, bad.times_correct, bad.times_answered
        )));
    }
    Ok(())
}

/// Builds a review queue from a caller-supplied performance history.
///
/// * Nothing is persisted.
/// * `now` defaults to the server clock, sampled once for the whole queue.
pub async fn build_review_queue(
    State(config): State<Config>,
    payload: Result<Json<BuildQueueRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;
    ensure_consistent(&req.performances)?;

    let now = req.now.unwrap_or_else(Utc::now);
    let limit = config.resolve_limit(req.limit);

    let queue = build_queue(&req.performances, limit, now);

    tracing::info!(
        "Review queue built from {} records: {} items",
        req.performances.len(),
        queue.len()
    );

    Ok(Json(queue))
}

/// Aggregates per-topic accuracy from a caller-supplied performance history.
pub async fn topic_accuracy(
    payload: Result<Json<TopicAccuracyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;
    ensure_consistent(&req.performances)?;

    Ok(Json(aggregate_by_topic(&req.performances)))
}
