// src/review/mod.rs

//! Adaptive review scheduling.
//!
//! Turns a learner's answer history into a ranked queue of questions to
//! revisit. Everything here is pure: the caller supplies `now`, nothing is
//! read from the clock or the database.

pub mod history;
pub mod label;
pub mod priority;
pub mod queue;
pub mod topic;

pub use history::fold_attempts;
pub use label::classify;
pub use priority::calculate_priority;
pub use queue::{DEFAULT_QUEUE_LIMIT, build_queue};
pub use topic::{
    TopicAccuracyMap, aggregate_by_topic, build_topic_accuracy_map, lookup_topic_accuracy,
};

/// Topics below this accuracy (percent) count as weak.
pub const WEAK_TOPIC_THRESHOLD: u32 = 70;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::models::review::QuestionPerformance;

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    pub fn days_ago(days: i64) -> DateTime<Utc> {
        now() - Duration::days(days)
    }

    /// A correct, fresh, well-practised record: no urgency clause fires.
    pub fn mastered(question_id: &str, topic: &str) -> QuestionPerformance {
        QuestionPerformance {
            question_id: question_id.to_string(),
            quiz_id: "quiz-1".to_string(),
            quiz_title: "Basics".to_string(),
            question_text: format!("Question {}", question_id),
            topic: Some(topic.to_string()),
            difficulty: "medium".to_string(),
            is_correct: true,
            last_answered_at: now(),
            response_time: 0.0,
            times_answered: 10,
            times_correct: 9,
            tags: vec!["core".to_string()],
        }
    }
}
