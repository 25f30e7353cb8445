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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::cmd::inputs::read_phrases;
use crate::cmd::inputs::read_progress;
use crate::cmd::inputs::resolve_now;
use crate::config::SchedulerConfig;
use crate::error::Fallible;
use crate::stats::ProgressStats;
use crate::stats::compute_stats;
use crate::stats::due_cards;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatsFormat {
    /// JSON output.
    Json,
    /// Plain text output.
    Text,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Json => write!(f, "json"),
            StatsFormat::Text => write!(f, "text"),
        }
    }
}

pub struct StatsArgs<'a> {
    pub phrases: &'a Path,
    pub progress: &'a Path,
    pub config: Option<&'a Path>,
    pub now: Option<&'a str>,
}

pub fn print_stats(args: StatsArgs<'_>, format: StatsFormat) -> Fallible<()> {
    let stats = load_stats(&args)?;
    let output = match format {
        StatsFormat::Json => serde_json::to_string_pretty(&stats)?,
        StatsFormat::Text => render_text(&stats)?,
    };
    println!("{output}");
    Ok(())
}

/// Print the review queue, one phrase per line.
pub fn print_due(args: StatsArgs<'_>) -> Fallible<()> {
    let lines = due_lines(&args)?;
    if lines.is_empty() {
        println!("No cards due.");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn load_stats(args: &StatsArgs<'_>) -> Fallible<ProgressStats> {
    let now = resolve_now(args.now)?;
    let config = SchedulerConfig::load(args.config)?;
    let phrases = read_phrases(args.phrases)?;
    let progress = read_progress(args.progress, &config)?;
    Ok(compute_stats(&phrases, &progress, now, &config))
}

fn due_lines(args: &StatsArgs<'_>) -> Fallible<Vec<String>> {
    let now = resolve_now(args.now)?;
    let config = SchedulerConfig::load(args.config)?;
    let phrases = read_phrases(args.phrases)?;
    let progress = read_progress(args.progress, &config)?;
    let lines = due_cards(&phrases, &progress, now)
        .into_iter()
        .map(|p| format!("{}\t{}\t{}", p.id, p.source_text, p.target_text))
        .collect();
    Ok(lines)
}

fn render_text(stats: &ProgressStats) -> Fallible<String> {
    let mut out = String::new();
    let rows = [
        ("Total cards", stats.total_cards.to_string()),
        ("New", stats.new_cards.to_string()),
        ("Learned", stats.learned_cards.to_string()),
        ("Learning", stats.learning_cards.to_string()),
        ("Reviewing", stats.reviewing_cards.to_string()),
        ("Mastered", stats.mastered_cards.to_string()),
        ("Due now", stats.cards_to_review.to_string()),
        ("Due today", stats.cards_to_review_today.to_string()),
        ("Overdue", stats.overdue_cards.to_string()),
        ("Accuracy", format!("{}%", stats.accuracy_rate)),
        ("Average streak", stats.average_streak.to_string()),
    ];
    for (key, value) in rows {
        writeln!(out, "{key:<16}{value}")?;
    }
    if !stats.weakest_cards.is_empty() {
        writeln!(out, "Weakest cards:")?;
        for phrase in &stats.weakest_cards {
            writeln!(out, "  {}\t{}", phrase.id, phrase.source_text)?;
        }
    }
    Ok(out.trim_end().to_string())
}
