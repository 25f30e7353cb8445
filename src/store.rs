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

//! The progress of one (user, set) pair, as the storage layer persists it:
//! a single JSON object mapping phrase ids to progress records.
//!
//! Entries are written back exactly as they were read until a card is
//! graded, so records this crate cannot read (or had to repair) survive
//! every rewrite.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::config::SchedulerConfig;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::grade::Difficulty;
use crate::types::phrase::PhraseId;
use crate::types::progress::CardProgressData;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Default, PartialEq, Debug)]
pub struct ProgressMap {
    records: BTreeMap<String, CardProgressData>,
    /// Persisted entries, as read, that have not been overwritten since.
    persisted: BTreeMap<String, Value>,
}

/// A record as it may appear in stale persisted data.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    srs_level: Option<f64>,
    next_review_date: Option<String>,
    last_reviewed_date: Option<String>,
    difficulty: Option<String>,
    repetitions: Option<f64>,
    ease_factor: Option<f64>,
}

impl ProgressMap {
    /// Creates a new, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted progress blob. The blob must be a JSON object;
    /// records inside it are repaired where possible and skipped otherwise.
    pub fn from_json(content: &str, config: &SchedulerConfig) -> Fallible<Self> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Object(entries) = value else {
            return fail("progress data must be a JSON object.");
        };
        let mut records = BTreeMap::new();
        let mut persisted = BTreeMap::new();
        for (key, value) in entries {
            if key.trim().is_empty() {
                log::warn!("Skipping progress record with an empty phrase id.");
            } else if let Some(record) = parse_record(&key, value.clone(), config) {
                records.insert(key.clone(), record);
            }
            persisted.insert(key, value);
        }
        Ok(Self { records, persisted })
    }

    /// Serialize the whole map. Entries that were never overwritten are
    /// emitted as they were read.
    pub fn to_json(&self) -> Fallible<String> {
        let mut entries: Map<String, Value> = self
            .persisted
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, record) in &self.records {
            if !self.persisted.contains_key(key) {
                entries.insert(key.clone(), serde_json::to_value(record)?);
            }
        }
        let json = serde_json::to_string_pretty(&Value::Object(entries))?;
        Ok(json)
    }

    /// Retrieve a card's progress. `None` means the card is new.
    pub fn get(&self, id: &PhraseId) -> Option<&CardProgressData> {
        self.records.get(id.as_str())
    }

    /// Overwrite a card's progress, returning the previous record.
    pub fn insert(&mut self, id: &PhraseId, record: CardProgressData) -> Option<CardProgressData> {
        self.persisted.remove(id.as_str());
        self.records.insert(id.as_str().to_string(), record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardProgressData)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(PhraseId, CardProgressData)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (PhraseId, CardProgressData)>>(iter: I) -> Self {
        let records = iter
            .into_iter()
            .map(|(id, record)| (id.as_str().to_string(), record))
            .collect();
        Self {
            records,
            persisted: BTreeMap::new(),
        }
    }
}

fn parse_record(key: &str, value: Value, config: &SchedulerConfig) -> Option<CardProgressData> {
    let raw: RawRecord = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Skipping malformed progress record {key}: {e}");
            return None;
        }
    };
    let next_review_date = parse_timestamp(key, "nextReviewDate", raw.next_review_date)?;
    let last_reviewed_date = parse_timestamp(key, "lastReviewedDate", raw.last_reviewed_date)?;
    let difficulty = match raw.difficulty.as_deref().map(Difficulty::try_from) {
        Some(Ok(difficulty)) => difficulty,
        Some(Err(e)) => {
            log::warn!("Progress record {key}: {}; treating as new.", e.message());
            Difficulty::New
        }
        None => Difficulty::New,
    };
    let ease_factor = match raw.ease_factor {
        Some(ease) if ease.is_finite() && ease >= config.min_ease_factor => ease,
        Some(ease) => {
            log::warn!(
                "Progress record {key}: ease factor {ease} clamped to {}.",
                config.min_ease_factor
            );
            config.min_ease_factor
        }
        None => config.initial_ease_factor,
    };
    Some(CardProgressData {
        srs_level: clamp_count(key, "srsLevel", raw.srs_level),
        next_review_date,
        last_reviewed_date,
        difficulty,
        repetitions: clamp_count(key, "repetitions", raw.repetitions),
        ease_factor,
    })
}

fn parse_timestamp(key: &str, field: &str, value: Option<String>) -> Option<Timestamp> {
    let Some(value) = value else {
        log::warn!("Skipping progress record {key}: missing {field}.");
        return None;
    };
    match Timestamp::parse(&value) {
        Ok(ts) => Some(ts),
        Err(e) => {
            log::warn!("Skipping progress record {key}: {field}: {}", e.message());
            None
        }
    }
}

/// Coerce a persisted count into a non-negative integer.
fn clamp_count(key: &str, field: &str, value: Option<f64>) -> u32 {
    match value {
        Some(n) if n.is_finite() && n >= 0.0 => n.round().min(u32::MAX as f64) as u32,
        Some(n) => {
            log::warn!("Progress record {key}: {field} {n} clamped to 0.");
            0
        }
        None => 0,
    }
}
