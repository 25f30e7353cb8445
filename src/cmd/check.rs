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

use std::path::Path;

use crate::cmd::inputs::read_phrases;
use crate::cmd::inputs::read_progress;
use crate::config::SchedulerConfig;
use crate::error::Fallible;

pub fn check_inputs(
    phrases: &Path,
    progress: Option<&Path>,
    config: Option<&Path>,
) -> Fallible<()> {
    validate(phrases, progress, config)?;
    println!("ok");
    Ok(())
}

/// Load every input the way `grade` and `stats` would. Progress records
/// that need repair are reported through the log, not as errors.
fn validate(phrases: &Path, progress: Option<&Path>, config: Option<&Path>) -> Fallible<()> {
    let config = SchedulerConfig::load(config)?;
    let phrases = read_phrases(phrases)?;
    if let Some(path) = progress {
        let progress = read_progress(path, &config)?;
        let orphans = progress
            .iter()
            .filter(|(key, _)| !phrases.iter().any(|p| p.id.as_str() == *key))
            .count();
        if orphans > 0 {
            log::warn!("{orphans} progress records do not match any phrase.");
        }
    }
    Ok(())
}
