// src/review/history.rs

use std::collections::HashMap;

use crate::models::{attempt::QuestionAttempt, review::QuestionPerformance};

/// Collapses a raw attempt log into one performance record per question.
///
/// Counters cover every attempt; outcome, response time and display fields
/// come from the latest attempt (largest `answered_at`, then largest id).
/// Questions are returned in the order they were first answered.
pub fn fold_attempts(attempts: &[QuestionAttempt]) -> Vec<QuestionPerformance> {
    let mut ordered: Vec<&QuestionAttempt> = attempts.iter().collect();
    ordered.sort_by_key(|a| (a.answered_at, a.id));

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut folded: Vec<QuestionPerformance> = Vec::new();

    for attempt in ordered {
        let slot = *index.entry(&attempt.question_id).or_insert_with(|| {
            folded.push(empty_performance(attempt));
            folded.len() - 1
        });

        let perf = &mut folded[slot];
        perf.times_answered += 1;
        if attempt.is_correct {
            perf.times_correct += 1;
        }
        apply_latest(perf, attempt);
    }

    folded
}

fn empty_performance(attempt: &QuestionAttempt) -> QuestionPerformance {
    QuestionPerformance {
        question_id: attempt.question_id.clone(),
        quiz_id: String::new(),
        quiz_title: String::new(),
        question_text: String::new(),
        topic: None,
        difficulty: String::new(),
        is_correct: attempt.is_correct,
        last_answered_at: attempt.answered_at,
        response_time: 0.0,
        times_answered: 0,
        times_correct: 0,
        tags: Vec::new(),
    }
}

// Attempts arrive oldest first, so each call overwrites with a newer one.
fn apply_latest(perf: &mut QuestionPerformance, attempt: &QuestionAttempt) {
    perf.quiz_id = attempt.quiz_id.clone();
    perf.quiz_title = attempt.quiz_title.clone();
    perf.question_text = attempt.question_text.clone();
    perf.topic = attempt.topic.clone();
    perf.difficulty = attempt.difficulty.clone();
    perf.is_correct = attempt.is_correct;
    perf.last_answered_at = attempt.answered_at;
    perf.response_time = attempt.response_time;
    perf.tags = attempt.tags.0.clone();
}
