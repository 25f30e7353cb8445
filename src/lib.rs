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

//! phrasecards: spaced repetition scheduling for phrase flashcards.
//!
//! - `srs`: grades a single card and computes its next review.
//! - `stats`: summarises the progress of a whole phrase set.
//! - `store`: the typed view of the persisted progress blob.

pub mod cli;
mod cmd;
pub mod config;
pub mod error;
pub mod srs;
pub mod stats;
pub mod store;
pub mod types;

pub use config::SchedulerConfig;
pub use error::{ErrorReport, Fallible, fail};
pub use srs::grade_card;
pub use stats::{ProgressStats, compute_stats, due_cards};
pub use store::ProgressMap;
pub use types::grade::{Difficulty, Grade};
pub use types::phrase::{Phrase, PhraseId};
pub use types::progress::CardProgressData;
pub use types::stage::Stage;
pub use types::timestamp::Timestamp;
