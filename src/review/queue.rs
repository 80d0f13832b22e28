// src/review/queue.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{
    label::classify,
    priority::calculate_priority,
    topic::{build_topic_accuracy_map, lookup_topic_accuracy},
};
use crate::models::review::{QuestionPerformance, SpacedReviewItem};

pub const DEFAULT_QUEUE_LIMIT: usize = 20;

/// Keeps one record per question: the one answered last.
///
/// Exact ties keep the record seen first. Output follows the order in
/// which each question first appears in the input.
pub fn latest_per_question(performances: &[QuestionPerformance]) -> Vec<&QuestionPerformance> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut latest: Vec<&QuestionPerformance> = Vec::new();

    for perf in performances {
        match index.get(perf.question_id.as_str()) {
            Some(&slot) => {
                if perf.last_answered_at > latest[slot].last_answered_at {
                    latest[slot] = perf;
                }
            }
            None => {
                index.insert(&perf.question_id, latest.len());
                latest.push(perf);
            }
        }
    }

    latest
}

/// Builds the review queue for one learner.
///
/// Topic accuracy is computed over the full history, while scoring only
/// looks at the latest record per question. Items with a zero score are
/// dropped. The rest are ordered by score (highest first), then by
/// `last_answered_at` (oldest first), and cut to `limit`.
pub fn build_queue(
    performances: &[QuestionPerformance],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<SpacedReviewItem> {
    if performances.is_empty() || limit == 0 {
        return Vec::new();
    }

    let topic_accuracy = build_topic_accuracy_map(performances);
    let latest = latest_per_question(performances);
    let candidates = latest.len();

    let mut queue: Vec<SpacedReviewItem> = latest
        .into_iter()
        .filter_map(|perf| {
            let score = calculate_priority(perf, &topic_accuracy, now);
            if score == 0 {
                return None;
            }
            let label = classify(perf, lookup_topic_accuracy(&topic_accuracy, perf), now);
            Some(SpacedReviewItem::new(perf, score, label))
        })
        .collect();

    // Stable sort: equal keys keep first-seen question order.
    queue.sort_by(|a, b| {
        b.priority_score
            .cmp(&a.priority_score)
            .then(a.last_answered_at.cmp(&b.last_answered_at))
    });
    queue.truncate(limit);

    tracing::debug!(
        records = performances.len(),
        questions = candidates,
        queued = queue.len(),
        "Built review queue"
    );

    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::ReviewLabel;
    use crate::review::fixtures::{days_ago, mastered, now};
    use chrono::Duration;

    /// Wrong on the only answer so far.
    fn failed_once(question_id: &str, topic: &str) -> QuestionPerformance {
        let mut perf = mastered(question_id, topic);
        perf.is_correct = false;
        perf.times_answered = 1;
        perf.times_correct = 0;
        perf
    }

    #[test]
    fn empty_input_gives_empty_queue() {
        assert!(build_queue(&[], DEFAULT_QUEUE_LIMIT, now()).is_empty());
    }

    #[test]
    fn single_failure_without_topic_scores_ninety() {
        let mut perf = failed_once("q1", "");
        perf.topic = None;

        let queue = build_queue(&[perf], DEFAULT_QUEUE_LIMIT, now());

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].question_id, "q1");
        // 50 wrong + 15 few attempts + 25 low accuracy
        assert_eq!(queue[0].priority_score, 90);
        assert_eq!(queue[0].label, ReviewLabel::NeedsReview);
        assert_eq!(queue[0].topic, "General");
        assert_eq!(queue[0].accuracy, 0);
    }

    #[test]
    fn single_failure_with_topic_also_marks_topic_weak() {
        let queue = build_queue(&[failed_once("q1", "Optics")], DEFAULT_QUEUE_LIMIT, now());

        assert_eq!(queue.len(), 1);
        // Optics is 0/1, so the weak-topic clause adds 30.
        assert_eq!(queue[0].priority_score, 120);
        assert_eq!(queue[0].label, ReviewLabel::NeedsReview);
    }

    #[test]
    fn stale_item_is_due_for_review() {
        let mut perf = mastered("q1", "Algebra");
        perf.last_answered_at = days_ago(4);

        let queue = build_queue(&[perf], DEFAULT_QUEUE_LIMIT, now());

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].priority_score, 20);
        assert_eq!(queue[0].label, ReviewLabel::DueForReview);
        assert_eq!(queue[0].accuracy, 90);
    }

    #[test]
    fn weak_topic_label_from_other_records() {
        let mut perf = mastered("q1", "Algebra");
        perf.times_correct = 8;
        // Another question drags the topic to 60%.
        let mut other = mastered("q2", "Algebra");
        other.times_answered = 10;
        other.times_correct = 4;
        other.last_answered_at = now();

        let queue = build_queue(&[perf, other], DEFAULT_QUEUE_LIMIT, now());

        let item = queue.iter().find(|i| i.question_id == "q1").unwrap();
        assert_eq!(item.priority_score, 30);
        assert_eq!(item.label, ReviewLabel::WeakTopic);
    }

    #[test]
    fn only_latest_record_per_question_is_scored() {
        let mut older = failed_once("q1", "Algebra");
        older.last_answered_at = days_ago(2);
        let newer = mastered("q1", "Algebra");

        let queue = build_queue(&[older, newer.clone()], DEFAULT_QUEUE_LIMIT, now());

        // Latest record is correct, fresh and practised; topic is 9/11 = 82%.
        assert!(queue.is_empty());

        let mut stale_newer = newer;
        stale_newer.last_answered_at = days_ago(1);
        let mut older = failed_once("q1", "Algebra");
        older.last_answered_at = days_ago(9);
        let queue = build_queue(&[stale_newer, older], DEFAULT_QUEUE_LIMIT, now());
        assert!(queue.is_empty());
    }

    #[test]
    fn latest_record_supplies_the_output_fields() {
        let mut t1 = failed_once("q1", "Algebra");
        t1.last_answered_at = days_ago(5);
        t1.question_text = "old wording".to_string();
        let mut t2 = failed_once("q1", "Algebra");
        t2.last_answered_at = days_ago(1);
        t2.question_text = "new wording".to_string();

        let queue = build_queue(&[t2.clone(), t1], DEFAULT_QUEUE_LIMIT, now());

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].question_text, "new wording");
        assert_eq!(queue[0].last_answered_at, t2.last_answered_at);
    }

    #[test]
    fn exact_timestamp_tie_keeps_first_seen() {
        let mut first = failed_once("q1", "Algebra");
        first.quiz_title = "first".to_string();
        let mut second = failed_once("q1", "Algebra");
        second.quiz_title = "second".to_string();

        let records = [first, second];
        let latest = latest_per_question(&records);

        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].quiz_title, "first");
    }

    #[test]
    fn zero_priority_items_are_dropped() {
        let records = vec![
            mastered("q1", "Algebra"),
            mastered("q2", "Algebra"),
            mastered("q3", "Geometry"),
        ];
        assert!(build_queue(&records, DEFAULT_QUEUE_LIMIT, now()).is_empty());
    }

    #[test]
    fn sorted_by_score_then_oldest_first() {
        // Keep the topic strong so only per-item clauses fire.
        let anchor = {
            let mut p = mastered("anchor", "Algebra");
            p.times_answered = 100;
            p.times_correct = 100;
            p
        };
        let mut stale_old = mastered("stale-old", "Algebra");
        stale_old.last_answered_at = days_ago(10);
        let mut stale_new = mastered("stale-new", "Algebra");
        stale_new.last_answered_at = days_ago(5);
        let mut wrong = mastered("wrong", "Algebra");
        wrong.is_correct = false;

        let queue = build_queue(
            &[anchor, stale_new, wrong, stale_old],
            DEFAULT_QUEUE_LIMIT,
            now(),
        );

        let ids: Vec<&str> = queue.iter().map(|i| i.question_id.as_str()).collect();
        assert_eq!(ids, vec!["wrong", "stale-old", "stale-new"]);
        for pair in queue.windows(2) {
            assert!(
                pair[0].priority_score > pair[1].priority_score
                    || (pair[0].priority_score == pair[1].priority_score
                        && pair[0].last_answered_at <= pair[1].last_answered_at)
            );
        }
    }

    #[test]
    fn limit_keeps_highest_scores() {
        let anchor = {
            let mut p = mastered("anchor", "Algebra");
            p.times_answered = 100;
            p.times_correct = 100;
            p
        };
        let mut ninety = mastered("ninety", "Algebra");
        ninety.is_correct = false;
        ninety.times_answered = 1;
        ninety.times_correct = 0;
        let mut fifty = mastered("fifty", "Algebra");
        fifty.is_correct = false;
        let mut twenty = mastered("twenty", "Algebra");
        twenty.last_answered_at = days_ago(4);

        let records = vec![anchor, twenty, fifty, ninety];
        let full = build_queue(&records, DEFAULT_QUEUE_LIMIT, now());
        let scores: Vec<u32> = full.iter().map(|i| i.priority_score).collect();
        assert_eq!(scores, vec![90, 50, 20]);

        let top = build_queue(&records, 1, now());
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].question_id, "ninety");
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let queue = build_queue(&[failed_once("q1", "Algebra")], 0, now());
        assert!(queue.is_empty());
    }

    #[test]
    fn same_input_same_output() {
        let mut records = Vec::new();
        for i in 0..30 {
            let mut p = failed_once(&format!("q{}", i % 12), "Algebra");
            p.last_answered_at = now() - Duration::hours(i as i64 % 5);
            p.times_answered = (i % 4) as u32;
            records.push(p);
        }

        let a = build_queue(&records, DEFAULT_QUEUE_LIMIT, now());
        let b = build_queue(&records, DEFAULT_QUEUE_LIMIT, now());

        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        assert_eq!(a.len(), 12);
    }
}
