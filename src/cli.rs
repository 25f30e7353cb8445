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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::check::check_inputs;
use crate::cmd::grade::GradeArgs;
use crate::cmd::grade::grade_phrase;
use crate::cmd::stats::StatsArgs;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_due;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Grade a phrase and save its new progress.
    Grade {
        /// The id of the phrase being graded.
        phrase_id: String,
        /// One of `hard`, `good`, `easy`.
        grade: String,
        /// Path to the progress file. Created if missing.
        #[arg(long)]
        progress: PathBuf,
        /// Optional phrase file, to reject unknown ids.
        #[arg(long)]
        phrases: Option<PathBuf>,
        /// Optional path to the scheduler config.
        #[arg(long)]
        config: Option<PathBuf>,
        /// The review time (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<String>,
    },
    /// Print progress statistics for a phrase set.
    Stats {
        #[arg(long)]
        phrases: PathBuf,
        #[arg(long)]
        progress: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        now: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Json)]
        format: StatsFormat,
    },
    /// List the phrases due for review.
    Due {
        #[arg(long)]
        phrases: PathBuf,
        #[arg(long)]
        progress: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        now: Option<String>,
    },
    /// Check that the input files are valid.
    Check {
        #[arg(long)]
        phrases: PathBuf,
        #[arg(long)]
        progress: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Grade {
            phrase_id,
            grade,
            progress,
            phrases,
            config,
            now,
        } => grade_phrase(GradeArgs {
            phrase_id: &phrase_id,
            grade: &grade,
            progress: &progress,
            phrases: phrases.as_deref(),
            config: config.as_deref(),
            now: now.as_deref(),
        }),
        Command::Stats {
            phrases,
            progress,
            config,
            now,
            format,
        } => print_stats(
            StatsArgs {
                phrases: &phrases,
                progress: &progress,
                config: config.as_deref(),
                now: now.as_deref(),
            },
            format,
        ),
        Command::Due {
            phrases,
            progress,
            config,
            now,
        } => print_due(StatsArgs {
            phrases: &phrases,
            progress: &progress,
            config: config.as_deref(),
            now: now.as_deref(),
        }),
        Command::Check {
            phrases,
            progress,
            config,
        } => check_inputs(&phrases, progress.as_deref(), config.as_deref()),
    }
}
