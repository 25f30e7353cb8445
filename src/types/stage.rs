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

/// The bucket an SRS level falls into.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    New,
    Learning,
    Reviewing,
    Mastered,
}

impl Stage {
    pub fn of(level: u32, config: &SchedulerConfig) -> Self {
        if level >= config.mastered_level {
            Stage::Mastered
        } else if level >= config.reviewing_level {
            Stage::Reviewing
        } else if level >= config.learning_level {
            Stage::Learning
        } else {
            Stage::New
        }
    }
}
