// src/review/label.rs

use chrono::{DateTime, Utc};

use super::priority::is_weak_topic;
use crate::models::review::{QuestionPerformance, ReviewLabel};

/// Picks the reason an item is due. First match wins:
/// a wrong latest attempt, then a weak topic, then plain time decay.
///
/// Independent of the numeric score, so two items with the same score
/// may carry different labels.
pub fn classify(
    perf: &QuestionPerformance,
    topic_accuracy: Option<u32>,
    _now: DateTime<Utc>,
) -> ReviewLabel {
    if !perf.is_correct {
        ReviewLabel::NeedsReview
    } else if is_weak_topic(topic_accuracy) {
        ReviewLabel::WeakTopic
    } else {
        ReviewLabel::DueForReview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::fixtures::{days_ago, mastered, now};

    #[test]
    fn incorrect_wins_over_weak_topic() {
        let mut perf = mastered("q1", "Algebra");
        perf.is_correct = false;
        perf.last_answered_at = days_ago(30);

        assert_eq!(classify(&perf, Some(10), now()), ReviewLabel::NeedsReview);
        assert_eq!(classify(&perf, None, now()), ReviewLabel::NeedsReview);
    }

    #[test]
    fn weak_topic_when_correct() {
        let perf = mastered("q1", "Algebra");
        assert_eq!(classify(&perf, Some(60), now()), ReviewLabel::WeakTopic);
    }

    #[test]
    fn falls_back_to_due_for_review() {
        let mut perf = mastered("q1", "Algebra");
        perf.last_answered_at = days_ago(4);

        assert_eq!(classify(&perf, Some(85), now()), ReviewLabel::DueForReview);
        assert_eq!(classify(&perf, None, now()), ReviewLabel::DueForReview);
    }
}
