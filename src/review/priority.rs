// src/review/priority.rs

//! Urgency scoring for a single question.
//!
//! The score is a plain sum; every clause that holds adds its weight:
//! - Latest attempt wrong: +50
//! - Topic accuracy known and below 70%: +30
//! - Last answered more than 3 days ago: +20
//! - Answered in under 3 seconds (likely a guess): +10
//! - Answered fewer than 3 times: +15
//! - Lifetime accuracy on the question below 50%: +25

use chrono::{DateTime, Duration, Utc};

use super::{
    WEAK_TOPIC_THRESHOLD,
    topic::{TopicAccuracyMap, lookup_topic_accuracy},
};
use crate::models::review::QuestionPerformance;

pub const INCORRECT_POINTS: u32 = 50;
pub const WEAK_TOPIC_POINTS: u32 = 30;
pub const STALE_POINTS: u32 = 20;
pub const FAST_GUESS_POINTS: u32 = 10;
pub const FEW_ATTEMPTS_POINTS: u32 = 15;
pub const LOW_ACCURACY_POINTS: u32 = 25;

/// Items untouched for longer than this are due again.
pub const STALE_AFTER_DAYS: i64 = 3;

/// Responses faster than this many seconds look like guesses.
pub const FAST_GUESS_SECONDS: f64 = 3.0;

/// Fewer answers than this is not enough repetition to trust.
pub const MIN_ATTEMPTS: u32 = 3;

/// Lifetime accuracy (percent) under which a question counts as chronically missed.
pub const LOW_ACCURACY_THRESHOLD: f64 = 50.0;

/// Highest score any record can reach.
pub const MAX_PRIORITY: u32 = INCORRECT_POINTS
    + WEAK_TOPIC_POINTS
    + STALE_POINTS
    + FAST_GUESS_POINTS
    + FEW_ATTEMPTS_POINTS
    + LOW_ACCURACY_POINTS;

pub fn is_stale(perf: &QuestionPerformance, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(perf.last_answered_at) > Duration::days(STALE_AFTER_DAYS)
}

/// 0 means "not measured", so only strictly positive times count.
pub fn is_fast_guess(perf: &QuestionPerformance) -> bool {
    perf.response_time > 0.0 && perf.response_time < FAST_GUESS_SECONDS
}

/// Weak only when the topic has an aggregate and it is below the threshold.
pub fn is_weak_topic(topic_accuracy: Option<u32>) -> bool {
    topic_accuracy.is_some_and(|acc| acc < WEAK_TOPIC_THRESHOLD)
}

fn lifetime_accuracy(perf: &QuestionPerformance) -> f64 {
    if perf.times_answered == 0 {
        return 0.0;
    }
    f64::from(perf.times_correct) * 100.0 / f64::from(perf.times_answered)
}

/// Calculate the priority score for one question.
///
/// Higher scores surface first; 0 means no urgency signal fired.
pub fn calculate_priority(
    perf: &QuestionPerformance,
    topic_accuracy: &TopicAccuracyMap,
    now: DateTime<Utc>,
) -> u32 {
    let mut priority = 0;

    if !perf.is_correct {
        priority += INCORRECT_POINTS;
    }

    if is_weak_topic(lookup_topic_accuracy(topic_accuracy, perf)) {
        priority += WEAK_TOPIC_POINTS;
    }

    if is_stale(perf, now) {
        priority += STALE_POINTS;
    }

    if is_fast_guess(perf) {
        priority += FAST_GUESS_POINTS;
    }

    if perf.times_answered < MIN_ATTEMPTS {
        priority += FEW_ATTEMPTS_POINTS;
    }

    if lifetime_accuracy(perf) < LOW_ACCURACY_THRESHOLD {
        priority += LOW_ACCURACY_POINTS;
    }

    debug_assert!(priority <= MAX_PRIORITY);
    priority
}
