// src/models/review.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Topic used when a record carries no topic (or an empty one).
pub const DEFAULT_TOPIC: &str = "General";

/// One question's performance history, as supplied by the caller.
///
/// Several records may share a `question_id` (one per attempt batch);
/// the queue builder keeps only the most recent of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPerformance {
    #[validate(length(min = 1, max = 128, message = "questionId must be 1-128 chars"))]
    pub question_id: String,
    #[serde(default)]
    pub quiz_id: String,
    #[serde(default)]
    pub quiz_title: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub difficulty: String,

    /// Outcome of the most recent recorded attempt.
    pub is_correct: bool,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_answered_at: DateTime<Utc>,

    /// Seconds taken to answer; 0 means unknown.
    #[serde(default)]
    #[validate(range(min = 0.0, message = "responseTime must not be negative"))]
    pub response_time: f64,

    #[serde(default)]
    pub times_answered: u32,
    #[serde(default)]
    pub times_correct: u32,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl QuestionPerformance {
    /// Topic key used for grouping, with the `"General"` fallback applied.
    pub fn topic_key(&self) -> &str {
        match self.topic.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TOPIC,
        }
    }

    /// The topic as supplied, `None` when absent or empty.
    pub fn declared_topic(&self) -> Option<&str> {
        self.topic.as_deref().filter(|t| !t.is_empty())
    }

    /// Per-question accuracy in whole percent; 0 when never answered.
    pub fn accuracy(&self) -> u32 {
        percent(self.times_correct.into(), self.times_answered.into())
    }

    pub fn counts_consistent(&self) -> bool {
        self.times_correct <= self.times_answered
    }
}

/// `round(100 * correct / total)`, or 0 when `total` is 0.
pub fn percent(correct: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 * 100.0 / total as f64).round() as u32
}

/// Aggregate correctness for one topic across every historical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicAccuracy {
    pub topic: String,
    pub correct: u64,
    pub total: u64,
    pub accuracy: u32,
}

/// Why an item surfaced in the review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewLabel {
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Weak Topic")]
    WeakTopic,
    #[serde(rename = "Due for Review")]
    DueForReview,
}

impl ReviewLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewLabel::NeedsReview => "Needs Review",
            ReviewLabel::WeakTopic => "Weak Topic",
            ReviewLabel::DueForReview => "Due for Review",
        }
    }
}

impl fmt::Display for ReviewLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the review queue returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacedReviewItem {
    pub question_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub question_text: String,
    pub topic: String,
    pub difficulty: String,
    pub is_correct: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_answered_at: DateTime<Utc>,

    /// Internal ranking score, not shown to learners.
    pub priority_score: u32,
    pub label: ReviewLabel,
    /// Per-question accuracy in whole percent.
    pub accuracy: u32,
    pub tags: Vec<String>,
}

impl SpacedReviewItem {
    pub fn new(perf: &QuestionPerformance, priority_score: u32, label: ReviewLabel) -> Self {
        Self {
            question_id: perf.question_id.clone(),
            quiz_id: perf.quiz_id.clone(),
            quiz_title: perf.quiz_title.clone(),
            question_text: perf.question_text.clone(),
            topic: perf.topic_key().to_string(),
            difficulty: perf.difficulty.clone(),
            is_correct: perf.is_correct,
            last_answered_at: perf.last_answered_at,
            priority_score,
            label,
            accuracy: perf.accuracy(),
            tags: perf.tags.clone(),
        }
    }
}

/// Body of `POST /api/review/queue`.
#[derive(Debug, Deserialize, Validate)]
pub struct BuildQueueRequest {
    #[validate(
        length(max = 5000, message = "At most 5000 performances per request"),
        nested
    )]
    pub performances: Vec<QuestionPerformance>,

    pub limit: Option<i64>,

    /// Reference instant in ms since epoch; defaults to the server clock.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub now: Option<DateTime<Utc>>,
}

/// Body of `POST /api/review/topics`.
#[derive(Debug, Deserialize, Validate)]
pub struct TopicAccuracyRequest {
    #[validate(
        length(max = 5000, message = "At most 5000 performances per request"),
        nested
    )]
    pub performances: Vec<QuestionPerformance>,
}
