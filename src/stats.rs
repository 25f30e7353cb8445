// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::store::ProgressMap;
use crate::types::phrase::Phrase;
use crate::types::progress::CardProgressData;
use crate::types::stage::Stage;
use crate::types::timestamp::Timestamp;

/// Dashboard statistics over a set of phrases.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_cards: usize,
    pub new_cards: usize,
    /// Cards past the new stage.
    pub learned_cards: usize,
    pub learning_cards: usize,
    pub reviewing_cards: usize,
    pub mastered_cards: usize,
    /// Cards due at or before `now`.
    pub cards_to_review: usize,
    /// Due cards whose due date is today (UTC).
    pub cards_to_review_today: usize,
    /// Due cards whose due date is before today (UTC).
    pub overdue_cards: usize,
    /// Percentage of reviewed cards last graded `good` or `easy`.
    pub accuracy_rate: u32,
    /// Mean SRS level of the reviewed cards.
    pub average_streak: u32,
    /// Reviewed, unmastered cards, lowest ease factor first.
    pub weakest_cards: Vec<Phrase>,
}

/// Compute statistics for `phrases`. Progress records for ids outside
/// `phrases` are ignored.
pub fn compute_stats(
    phrases: &[Phrase],
    progress: &ProgressMap,
    now: Timestamp,
    config: &SchedulerConfig,
) -> ProgressStats {
    let today = now.utc_date();
    let mut stats = ProgressStats {
        total_cards: phrases.len(),
        new_cards: 0,
        learned_cards: 0,
        learning_cards: 0,
        reviewing_cards: 0,
        mastered_cards: 0,
        cards_to_review: 0,
        cards_to_review_today: 0,
        overdue_cards: 0,
        accuracy_rate: 100,
        average_streak: 0,
        weakest_cards: Vec::new(),
    };
    let mut correct: u64 = 0;
    let mut level_sum: u64 = 0;
    let mut weakest: Vec<(&Phrase, f64)> = Vec::new();

    for (phrase, record) in reviewed(phrases, progress) {
        let Some(record) = record else {
            stats.new_cards += 1;
            continue;
        };
        stats.learned_cards += 1;
        level_sum += u64::from(record.srs_level);
        if record.difficulty.is_correct() {
            correct += 1;
        }
        match record.stage(config) {
            Stage::Mastered => stats.mastered_cards += 1,
            Stage::Reviewing => stats.reviewing_cards += 1,
            // A studied card below a raised `learning_level` still counts as learning.
            Stage::Learning | Stage::New => stats.learning_cards += 1,
        }
        if record.stage(config) != Stage::Mastered {
            weakest.push((phrase, record.ease_factor));
        }
        if record.is_due(now) {
            stats.cards_to_review += 1;
            if record.next_review_date.utc_date() < today {
                stats.overdue_cards += 1;
            } else {
                stats.cards_to_review_today += 1;
            }
        }
    }

    let reviewed_count = stats.learned_cards as u64;
    if reviewed_count > 0 {
        stats.accuracy_rate = rounded_ratio(100 * correct, reviewed_count);
        stats.average_streak = rounded_ratio(level_sum, reviewed_count);
    }

    // Stable, so equal ease factors keep the order of `phrases`.
    weakest.sort_by(|a, b| a.1.total_cmp(&b.1));
    stats.weakest_cards = weakest.into_iter().map(|(p, _)| p.clone()).collect();
    stats
}

/// The reviewed phrases due at or before `now`, earliest due first.
pub fn due_cards<'a>(
    phrases: &'a [Phrase],
    progress: &ProgressMap,
    now: Timestamp,
) -> Vec<&'a Phrase> {
    let mut due: Vec<(&Phrase, Timestamp)> = reviewed(phrases, progress)
        .filter_map(|(phrase, record)| record.map(|r| (phrase, r)))
        .filter(|(_, record)| record.is_due(now))
        .map(|(phrase, record)| (phrase, record.next_review_date))
        .collect();
    due.sort_by_key(|(_, ts)| *ts);
    due.into_iter().map(|(phrase, _)| phrase).collect()
}

/// Pair each phrase with its progress record, or `None` if it is new.
fn reviewed<'a, 'b>(
    phrases: &'a [Phrase],
    progress: &'b ProgressMap,
) -> impl Iterator<Item = (&'a Phrase, Option<&'b CardProgressData>)> {
    phrases.iter().map(move |phrase| {
        let record = progress.get(&phrase.id).filter(|record| record.is_reviewed());
        (phrase, record)
    })
}

/// `numerator / denominator`, rounded half up.
fn rounded_ratio(numerator: u64, denominator: u64) -> u32 {
    ((2 * numerator + denominator) / (2 * denominator)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::types::phrase::PhraseId;

    fn phrases(n: u64) -> Vec<Phrase> {
        (1..=n)
            .map(|id| Phrase {
                id: PhraseId::from(id),
                source_text: format!("source {id}"),
                target_text: format!("target {id}"),
                pronunciation: format!("pronunciation {id}"),
                translation: format!("translation {id}"),
            })
            .collect()
    }

    fn ids(phrases: &[Phrase]) -> Vec<&str> {
        phrases.iter().map(|p| p.id.as_str()).collect()
    }

    fn now() -> Timestamp {
        Timestamp::parse("2023-01-01T12:00:00Z").unwrap()
    }

    fn progress(json: &str) -> Fallible<ProgressMap> {
        ProgressMap::from_json(json, &SchedulerConfig::default())
    }

    const BASE: &str = r#"{
        "1": {"srsLevel": 7, "nextReviewDate": "2023-01-15T00:00:00.000Z", "lastReviewedDate": "2022-12-20T00:00:00.000Z", "difficulty": "good", "repetitions": 6, "easeFactor": 2.5},
        "2": {"srsLevel": 3, "nextReviewDate": "2023-01-02T00:00:00.000Z", "lastReviewedDate": "2022-12-27T00:00:00.000Z", "difficulty": "good", "repetitions": 2, "easeFactor": 2.3},
        "3": {"srsLevel": 1, "nextReviewDate": "2023-01-01T00:00:00.000Z", "lastReviewedDate": "2022-12-31T23:50:00.000Z", "difficulty": "hard", "repetitions": 0, "easeFactor": 1.5}
    }"#;

    const EXTENDED: &str = r#"{
        "1": {"srsLevel": 7, "nextReviewDate": "2023-01-15T00:00:00.000Z", "lastReviewedDate": "2022-12-20T00:00:00.000Z", "difficulty": "good", "repetitions": 6, "easeFactor": 2.5},
        "2": {"srsLevel": 3, "nextReviewDate": "2023-01-02T00:00:00.000Z", "lastReviewedDate": "2022-12-27T00:00:00.000Z", "difficulty": "good", "repetitions": 2, "easeFactor": 2.3},
        "3": {"srsLevel": 1, "nextReviewDate": "2023-01-01T00:00:00.000Z", "lastReviewedDate": "2022-12-31T23:50:00.000Z", "difficulty": "hard", "repetitions": 0, "easeFactor": 1.5},
        "4": {"srsLevel": 2, "nextReviewDate": "2023-01-03T00:00:00.000Z", "lastReviewedDate": "2022-12-28T00:00:00.000Z", "difficulty": "good", "repetitions": 2, "easeFactor": 2.0},
        "5": {"srsLevel": 1, "nextReviewDate": "2023-01-04T00:00:00.000Z", "lastReviewedDate": "2022-12-30T00:00:00.000Z", "difficulty": "good", "repetitions": 1, "easeFactor": 1.7}
    }"#;

    #[test]
    fn test_empty() {
        let stats = compute_stats(&[], &ProgressMap::new(), now(), &SchedulerConfig::default());
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.learned_cards, 0);
        assert_eq!(stats.mastered_cards, 0);
        assert_eq!(stats.cards_to_review, 0);
        assert_eq!(stats.cards_to_review_today, 0);
        assert_eq!(stats.accuracy_rate, 100);
        assert_eq!(stats.average_streak, 0);
        assert!(stats.weakest_cards.is_empty());
    }

    #[test]
    fn test_no_progress() {
        let phrases = phrases(5);
        let config = SchedulerConfig::default();
        let stats = compute_stats(&phrases, &ProgressMap::new(), now(), &config);
        assert_eq!(stats.total_cards, 5);
        assert_eq!(stats.new_cards, 5);
        assert_eq!(stats.learned_cards, 0);
        assert_eq!(stats.mastered_cards, 0);
        assert_eq!(stats.cards_to_review, 0);
        assert_eq!(stats.cards_to_review_today, 0);
        assert_eq!(stats.accuracy_rate, 100);
        assert_eq!(stats.average_streak, 0);
        assert!(stats.weakest_cards.is_empty());
    }

    #[test]
    fn test_mixed_progress() -> Fallible<()> {
        let phrases = phrases(5);
        let stats = compute_stats(&phrases, &progress(BASE)?, now(), &SchedulerConfig::default());
        assert_eq!(stats.total_cards, 5);
        assert_eq!(stats.new_cards, 2);
        assert_eq!(stats.learned_cards, 3);
        assert_eq!(stats.learning_cards, 1);
        assert_eq!(stats.reviewing_cards, 1);
        assert_eq!(stats.mastered_cards, 1);
        assert_eq!(stats.cards_to_review, 1);
        assert_eq!(stats.cards_to_review_today, 1);
        assert_eq!(stats.overdue_cards, 0);
        assert_eq!(stats.accuracy_rate, 67);
        assert_eq!(stats.average_streak, 4);
        assert_eq!(ids(&stats.weakest_cards), vec!["3", "2"]);
        Ok(())
    }

    #[test]
    fn test_weakest_cards_sorted_by_ease() -> Fallible<()> {
        let phrases = phrases(5);
        let config = SchedulerConfig::default();
        let stats = compute_stats(&phrases, &progress(EXTENDED)?, now(), &config);
        assert_eq!(ids(&stats.weakest_cards), vec!["3", "5", "4", "2"]);
        assert_eq!(stats.weakest_cards[0].target_text, "target 3");
        Ok(())
    }

    #[test]
    fn test_weakest_ties_keep_phrase_order() -> Fallible<()> {
        let phrases = phrases(3);
        let progress = progress(
            r#"{
            "3": {"srsLevel": 2, "nextReviewDate": "2023-01-03T00:00:00Z", "lastReviewedDate": "2023-01-01T00:00:00Z", "difficulty": "good", "repetitions": 1, "easeFactor": 2.0},
            "1": {"srsLevel": 2, "nextReviewDate": "2023-01-03T00:00:00Z", "lastReviewedDate": "2023-01-01T00:00:00Z", "difficulty": "good", "repetitions": 1, "easeFactor": 2.0},
            "2": {"srsLevel": 2, "nextReviewDate": "2023-01-03T00:00:00Z", "lastReviewedDate": "2023-01-01T00:00:00Z", "difficulty": "good", "repetitions": 1, "easeFactor": 1.9}
        }"#,
        )?;
        let stats = compute_stats(&phrases, &progress, now(), &SchedulerConfig::default());
        assert_eq!(ids(&stats.weakest_cards), vec!["2", "1", "3"]);
        Ok(())
    }

    #[test]
    fn test_overdue_is_split_from_today() -> Fallible<()> {
        let phrases = phrases(3);
        let progress = progress(
            r#"{
            "1": {"srsLevel": 2, "nextReviewDate": "2022-12-30T08:00:00Z", "lastReviewedDate": "2022-12-29T08:00:00Z", "difficulty": "good", "repetitions": 1, "easeFactor": 2.5},
            "2": {"srsLevel": 2, "nextReviewDate": "2023-01-01T11:59:59Z", "lastReviewedDate": "2022-12-31T11:59:59Z", "difficulty": "good", "repetitions": 1, "easeFactor": 2.5},
            "3": {"srsLevel": 2, "nextReviewDate": "2023-01-01T12:00:01Z", "lastReviewedDate": "2022-12-31T12:00:01Z", "difficulty": "good", "repetitions": 1, "easeFactor": 2.5}
        }"#,
        )?;
        let stats = compute_stats(&phrases, &progress, now(), &SchedulerConfig::default());
        assert_eq!(stats.cards_to_review, 2);
        assert_eq!(stats.cards_to_review_today, 1);
        assert_eq!(stats.overdue_cards, 1);
        Ok(())
    }

    #[test]
    fn test_level_zero_records_and_unknown_ids() -> Fallible<()> {
        let phrases = phrases(2);
        let progress = progress(
            r#"{
            "1": {"srsLevel": 0, "nextReviewDate": "2022-12-30T08:00:00Z", "lastReviewedDate": "2022-12-29T08:00:00Z", "difficulty": "new", "repetitions": 0, "easeFactor": 2.5},
            "99": {"srsLevel": 4, "nextReviewDate": "2022-12-30T08:00:00Z", "lastReviewedDate": "2022-12-29T08:00:00Z", "difficulty": "hard", "repetitions": 0, "easeFactor": 1.3}
        }"#,
        )?;
        let stats = compute_stats(&phrases, &progress, now(), &SchedulerConfig::default());
        assert_eq!(stats.new_cards, 2);
        assert_eq!(stats.learned_cards, 0);
        assert_eq!(stats.cards_to_review, 0);
        assert_eq!(stats.accuracy_rate, 100);
        assert!(stats.weakest_cards.is_empty());
        Ok(())
    }

    #[test]
    fn test_custom_mastery_threshold() -> Fallible<()> {
        let config = SchedulerConfig {
            mastered_level: 3,
            reviewing_level: 2,
            ..SchedulerConfig::default()
        };
        let phrases = phrases(5);
        let stats = compute_stats(&phrases, &progress(EXTENDED)?, now(), &config);
        assert_eq!(stats.mastered_cards, 2);
        assert_eq!(ids(&stats.weakest_cards), vec!["3", "5", "4"]);
        Ok(())
    }

    #[test]
    fn test_raised_learning_level_keeps_studied_cards() -> Fallible<()> {
        let config = SchedulerConfig {
            learning_level: 2,
            ..SchedulerConfig::default()
        };
        let phrases = phrases(5);
        let stats = compute_stats(&phrases, &progress(EXTENDED)?, now(), &config);
        assert_eq!(stats.new_cards, 0);
        assert_eq!(stats.learned_cards, 5);
        assert_eq!(stats.learning_cards, 3);
        assert_eq!(stats.cards_to_review, 1);
        assert_eq!(stats.accuracy_rate, 80);
        assert_eq!(ids(&stats.weakest_cards), vec!["3", "5", "4", "2"]);
        Ok(())
    }

    #[test]
    fn test_is_idempotent() -> Fallible<()> {
        let phrases = phrases(5);
        let progress = progress(EXTENDED)?;
        let config = SchedulerConfig::default();
        let a = compute_stats(&phrases, &progress, now(), &config);
        let b = compute_stats(&phrases, &progress, now(), &config);
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_json_keys() -> Fallible<()> {
        let stats = compute_stats(&[], &ProgressMap::new(), now(), &SchedulerConfig::default());
        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["totalCards"], 0);
        assert_eq!(json["cardsToReviewToday"], 0);
        assert_eq!(json["accuracyRate"], 100);
        assert_eq!(json["weakestCards"], serde_json::json!([]));
        Ok(())
    }

    #[test]
    fn test_due_cards() -> Fallible<()> {
        let phrases = phrases(5);
        let progress = progress(EXTENDED)?;
        let later = Timestamp::parse("2023-01-03T00:00:00Z")?;
        let due = due_cards(&phrases, &progress, later);
        let due: Vec<&str> = due.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(due, vec!["3", "2", "4"]);
        assert_eq!(due_cards(&phrases, &progress, now()).len(), 1);
        Ok(())
    }

    #[test]
    fn test_rounding() {
        assert_eq!(rounded_ratio(11, 3), 4);
        assert_eq!(rounded_ratio(5, 2), 3);
        assert_eq!(rounded_ratio(200, 3), 67);
        assert_eq!(rounded_ratio(100, 3), 33);
    }
}
