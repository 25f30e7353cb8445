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
use std::fs::write;
use std::path::Path;
use std::time::Instant;

use crate::config::SchedulerConfig;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::ProgressMap;
use crate::types::phrase::Phrase;
use crate::types::phrase::load_phrases;
use crate::types::timestamp::Timestamp;

pub fn read_phrases(path: &Path) -> Fallible<Vec<Phrase>> {
    if !path.exists() {
        return fail(format!("phrase file {} does not exist.", path.display()));
    }
    log::debug!("Loading phrases...");
    let start = Instant::now();
    let content = read_to_string(path)?;
    let phrases = load_phrases(&content)?;
    let duration = start.elapsed().as_millis();
    log::debug!("Loaded {} phrases in {duration}ms.", phrases.len());
    Ok(phrases)
}

/// Read a progress file. A file that does not exist yet holds no progress.
pub fn read_progress(path: &Path, config: &SchedulerConfig) -> Fallible<ProgressMap> {
    if !path.exists() {
        log::debug!("Using empty progress map.");
        return Ok(ProgressMap::new());
    }
    let content = read_to_string(path)?;
    let progress = ProgressMap::from_json(&content, config)?;
    log::debug!("Loaded {} progress records.", progress.len());
    Ok(progress)
}

/// Rewrite the progress file in full.
pub fn write_progress(path: &Path, progress: &ProgressMap) -> Fallible<()> {
    let mut json = progress.to_json()?;
    json.push('\n');
    write(path, json)?;
    Ok(())
}

/// The reference time for a command: `--now` if given, else the clock.
pub fn resolve_now(now: Option<&str>) -> Fallible<Timestamp> {
    match now {
        Some(now) => Timestamp::parse(now),
        None => Ok(Timestamp::now()),
    }
}
