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

use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::types::grade::Difficulty;
use crate::types::stage::Stage;
use crate::types::timestamp::Timestamp;

/// Scheduling state of a single card. A card without a record is new.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProgressData {
    /// 0 is new; see `Stage` for the buckets.
    pub srs_level: u32,
    /// The earliest instant the card is due again.
    pub next_review_date: Timestamp,
    /// When the card was last graded.
    pub last_reviewed_date: Timestamp,
    /// The grade given at the last review.
    pub difficulty: Difficulty,
    /// Successful reviews since the last lapse.
    pub repetitions: u32,
    pub ease_factor: f64,
}

impl CardProgressData {
    pub fn stage(&self, config: &SchedulerConfig) -> Stage {
        Stage::of(self.srs_level, config)
    }

    /// Whether the card has been studied at all, independent of the stage
    /// thresholds.
    pub fn is_reviewed(&self) -> bool {
        self.srs_level >= 1
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_date <= now
    }

    /// The interval that was scheduled at the last review.
    pub fn interval(&self) -> Duration {
        self.next_review_date.since(self.last_reviewed_date)
    }
}
