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
use crate::cmd::inputs::resolve_now;
use crate::cmd::inputs::write_progress;
use crate::config::SchedulerConfig;
use crate::error::Fallible;
use crate::error::fail;
use crate::srs::grade_card;
use crate::types::grade::Grade;
use crate::types::phrase::PhraseId;
use crate::types::progress::CardProgressData;

pub struct GradeArgs<'a> {
    pub phrase_id: &'a str,
    pub grade: &'a str,
    pub progress: &'a Path,
    pub phrases: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub now: Option<&'a str>,
}

pub fn grade_phrase(args: GradeArgs<'_>) -> Fallible<()> {
    let record = apply_grade(args)?;
    let json = serde_json::to_string_pretty(&record)?;
    println!("{json}");
    Ok(())
}

/// Grade one phrase and rewrite the progress file. Everything is validated
/// before the file is touched.
fn apply_grade(args: GradeArgs<'_>) -> Fallible<CardProgressData> {
    let grade = Grade::parse(args.grade)?;
    let now = resolve_now(args.now)?;
    let config = SchedulerConfig::load(args.config)?;
    let id = PhraseId::new(args.phrase_id.trim());
    if id.as_str().is_empty() {
        return fail("phrase id must not be empty.");
    }
    if let Some(path) = args.phrases {
        let phrases = read_phrases(path)?;
        if !phrases.iter().any(|p| p.id == id) {
            return fail(format!("unknown phrase id: {id}"));
        }
    }
    let mut progress = read_progress(args.progress, &config)?;
    let record = grade_card(progress.get(&id), grade, now, &config);
    progress.insert(&id, record.clone());
    write_progress(args.progress, &progress)?;
    Ok(record)
}
