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

//! SM-2 style scheduling.
//!
//! A `hard` grade is a lapse: the card loses its repetitions, drops back to
//! the first learning level, and returns after a few minutes. `good` and
//! `easy` grow the interval geometrically by the ease factor.

use chrono::Duration;

use crate::config::SchedulerConfig;
use crate::types::grade::Difficulty;
use crate::types::grade::Grade;
use crate::types::progress::CardProgressData;
use crate::types::timestamp::Timestamp;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Compute a card's next scheduling state. `previous` is `None` for a card
/// that has never been graded.
pub fn grade_card(
    previous: Option<&CardProgressData>,
    grade: Grade,
    now: Timestamp,
    config: &SchedulerConfig,
) -> CardProgressData {
    let (level, repetitions, ease, last_interval) = match previous {
        Some(record) => (
            record.srs_level,
            record.repetitions,
            usable_ease(record.ease_factor, config),
            to_days(record.interval()).max(0.0),
        ),
        None => (0, 0, config.initial_ease_factor, 0.0),
    };

    let (srs_level, repetitions, ease_factor, interval) = match grade {
        Grade::Hard => {
            let ease = (ease - config.hard_penalty).max(config.min_ease_factor);
            let interval = Duration::minutes(config.hard_interval_minutes);
            (config.learning_level, 0, ease, interval)
        }
        Grade::Good => {
            let repetitions = repetitions.saturating_add(1);
            let days = good_interval(repetitions, last_interval, ease, config);
            (level.saturating_add(1), repetitions, ease, from_days(days, config))
        }
        Grade::Easy => {
            let repetitions = repetitions.saturating_add(1);
            let ease = ease + config.easy_bonus;
            let mut days =
                good_interval(repetitions, last_interval, ease, config) * config.easy_multiplier;
            if repetitions == 1 {
                days = days.max(config.easy_first_interval_days);
            }
            (level.saturating_add(2), repetitions, ease, from_days(days, config))
        }
    };

    let next_review_date = now.plus(interval);
    log::debug!(
        "{} L{}->L{} R={} EF={:.2} due={}",
        grade,
        level,
        srs_level,
        repetitions,
        ease_factor,
        next_review_date
    );
    CardProgressData {
        srs_level,
        next_review_date,
        last_reviewed_date: now,
        difficulty: Difficulty::from(grade),
        repetitions,
        ease_factor,
    }
}

/// The interval in days after a successful review, given the repetition
/// count after the increment.
fn good_interval(
    repetitions: u32,
    last_interval: f64,
    ease: f64,
    config: &SchedulerConfig,
) -> f64 {
    match repetitions {
        0 | 1 => config.first_interval_days,
        2 => config.second_interval_days,
        _ => last_interval.max(config.second_interval_days) * ease,
    }
}

fn usable_ease(ease: f64, config: &SchedulerConfig) -> f64 {
    if ease.is_finite() {
        ease.max(config.min_ease_factor)
    } else {
        config.initial_ease_factor
    }
}

fn to_days(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

fn from_days(days: f64, config: &SchedulerConfig) -> Duration {
    let days = days.min(config.max_interval_days);
    Duration::seconds((days * SECONDS_PER_DAY).round() as i64)
}
