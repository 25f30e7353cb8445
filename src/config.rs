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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// The lowest ease factor a card can have (the classic SM-2 floor).
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// The ease factor of a card that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Upper bound on `max_interval_days`, keeping due dates representable.
const INTERVAL_LIMIT_DAYS: f64 = 100_000.0;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// First level of the learning stage.
pub const LEARNING_LEVEL: u32 = 1;

/// First level of the reviewing stage.
pub const REVIEWING_LEVEL: u32 = 3;

/// First level of the mastered stage.
pub const MASTERED_LEVEL: u32 = 7;

/// Scheduling policy. Every field can be overridden from a TOML file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    pub min_ease_factor: f64,
    pub initial_ease_factor: f64,
    /// Subtracted from the ease factor on a `hard` grade.
    pub hard_penalty: f64,
    /// Added to the ease factor on an `easy` grade.
    pub easy_bonus: f64,
    /// How soon a card graded `hard` comes back.
    pub hard_interval_minutes: i64,
    pub first_interval_days: f64,
    pub second_interval_days: f64,
    /// Lower bound on the interval after the first `easy` grade.
    pub easy_first_interval_days: f64,
    /// How much longer an `easy` interval is than a `good` one.
    pub easy_multiplier: f64,
    pub max_interval_days: f64,
    pub learning_level: u32,
    pub reviewing_level: u32,
    pub mastered_level: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_ease_factor: MIN_EASE_FACTOR,
            initial_ease_factor: INITIAL_EASE_FACTOR,
            hard_penalty: 0.2,
            easy_bonus: 0.15,
            hard_interval_minutes: 10,
            first_interval_days: 1.0,
            second_interval_days: 6.0,
            easy_first_interval_days: 4.0,
            easy_multiplier: 1.3,
            max_interval_days: 36500.0,
            learning_level: LEARNING_LEVEL,
            reviewing_level: REVIEWING_LEVEL,
            mastered_level: MASTERED_LEVEL,
        }
    }
}

impl SchedulerConfig {
    pub fn from_toml(content: &str) -> Fallible<Self> {
        let config: SchedulerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from `path`, or use the defaults if no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                log::debug!("Loading scheduler config from {}", path.display());
                let content = read_to_string(path)?;
                Self::from_toml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Fallible<()> {
        let floats = [
            ("min_ease_factor", self.min_ease_factor),
            ("initial_ease_factor", self.initial_ease_factor),
            ("first_interval_days", self.first_interval_days),
            ("second_interval_days", self.second_interval_days),
            ("easy_first_interval_days", self.easy_first_interval_days),
            ("easy_multiplier", self.easy_multiplier),
            ("max_interval_days", self.max_interval_days),
        ];
        for (name, value) in floats {
            if !value.is_finite() || value <= 0.0 {
                return fail(format!("{name} must be a positive number."));
            }
        }
        for (name, value) in [
            ("hard_penalty", self.hard_penalty),
            ("easy_bonus", self.easy_bonus),
        ] {
            if !value.is_finite() || value < 0.0 {
                return fail(format!("{name} must not be negative."));
            }
        }
        if self.min_ease_factor > self.initial_ease_factor {
            return fail("min_ease_factor must not exceed initial_ease_factor.");
        }
        if self.easy_multiplier < 1.0 {
            return fail("easy_multiplier must be at least 1.");
        }
        if !(1..=MINUTES_PER_DAY).contains(&self.hard_interval_minutes) {
            return fail("hard_interval_minutes must be between 1 and 1440.");
        }
        if self.first_interval_days > self.second_interval_days
            || self.second_interval_days > self.max_interval_days
        {
            return fail(
                "intervals must satisfy first_interval_days <= second_interval_days <= max_interval_days.",
            );
        }
        if self.max_interval_days > INTERVAL_LIMIT_DAYS {
            return fail(format!(
                "max_interval_days must not exceed {INTERVAL_LIMIT_DAYS}."
            ));
        }
        if self.learning_level < 1
            || self.learning_level >= self.reviewing_level
            || self.reviewing_level >= self.mastered_level
        {
            return fail(
                "levels must satisfy 1 <= learning_level < reviewing_level < mastered_level.",
            );
        }
        Ok(())
    }
}
