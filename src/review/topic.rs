// src/review/topic.rs

use std::collections::{BTreeMap, HashMap};

use crate::models::review::{QuestionPerformance, TopicAccuracy, percent};

/// Topic name -> accuracy percent.
pub type TopicAccuracyMap = HashMap<String, u32>;

/// Folds every record (duplicates included) into per-topic accuracy.
///
/// Results come back sorted by topic name.
pub fn aggregate_by_topic(performances: &[QuestionPerformance]) -> Vec<TopicAccuracy> {
    let mut totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();

    for perf in performances {
        let entry = totals.entry(perf.topic_key()).or_default();
        entry.0 += u64::from(perf.times_correct);
        entry.1 += u64::from(perf.times_answered);
    }

    totals
        .into_iter()
        .map(|(topic, (correct, total))| TopicAccuracy {
            topic: topic.to_string(),
            correct,
            total,
            accuracy: percent(correct, total),
        })
        .collect()
}

pub fn build_topic_accuracy_map(performances: &[QuestionPerformance]) -> TopicAccuracyMap {
    aggregate_by_topic(performances)
        .into_iter()
        .map(|t| (t.topic, t.accuracy))
        .collect()
}

/// Accuracy of the record's own topic. Records without a topic are
/// grouped under "General" for aggregation but never looked up here.
pub fn lookup_topic_accuracy(map: &TopicAccuracyMap, perf: &QuestionPerformance) -> Option<u32> {
    perf.declared_topic().and_then(|topic| map.get(topic).copied())
}
