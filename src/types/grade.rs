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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// The answer a learner gives after seeing a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    /// Parse a grade. Unknown values are rejected rather than defaulted.
    pub fn parse(value: &str) -> Fallible<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            _ => fail(format!("invalid grade: {value:?}")),
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::parse(s)
    }
}

impl TryFrom<&str> for Grade {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Grade::parse(value)
    }
}

/// The grade recorded at a card's last review, or `New` if it has none.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    New,
    Hard,
    Good,
    Easy,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::New => "new",
            Difficulty::Hard => "hard",
            Difficulty::Good => "good",
            Difficulty::Easy => "easy",
        }
    }

    /// Whether the last review was a successful recall.
    pub fn is_correct(&self) -> bool {
        matches!(self, Difficulty::Good | Difficulty::Easy)
    }
}

impl From<Grade> for Difficulty {
    fn from(grade: Grade) -> Self {
        match grade {
            Grade::Hard => Difficulty::Hard,
            Grade::Good => Difficulty::Good,
            Grade::Easy => Difficulty::Easy,
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Difficulty::New),
            "hard" => Ok(Difficulty::Hard),
            "good" => Ok(Difficulty::Good),
            "easy" => Ok(Difficulty::Easy),
            _ => fail(format!("invalid difficulty: {value:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade() -> Fallible<()> {
        assert_eq!(Grade::parse("hard")?, Grade::Hard);
        assert_eq!(Grade::parse(" Good ")?, Grade::Good);
        assert_eq!("EASY".parse::<Grade>()?, Grade::Easy);
        Ok(())
    }

    #[test]
    fn test_invalid_grade_is_rejected() {
        let err = Grade::parse("again").unwrap_err();
        assert_eq!(err.to_string(), "error: invalid grade: \"again\"");
        assert!(Grade::try_from("").is_err());
        assert!(serde_json::from_str::<Grade>("\"forgot\"").is_err());
    }

    #[test]
    fn test_difficulty_from_grade() {
        assert_eq!(Difficulty::from(Grade::Hard), Difficulty::Hard);
        assert_eq!(Difficulty::from(Grade::Good), Difficulty::Good);
        assert_eq!(Difficulty::from(Grade::Easy), Difficulty::Easy);
    }

    #[test]
    fn test_is_correct() {
        assert!(!Difficulty::New.is_correct());
        assert!(!Difficulty::Hard.is_correct());
        assert!(Difficulty::Good.is_correct());
        assert!(Difficulty::Easy.is_correct());
    }

    #[test]
    fn test_difficulty_json() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&Difficulty::New)?, "\"new\"");
        assert_eq!(Difficulty::try_from("easy")?, Difficulty::Easy);
        assert_eq!(Difficulty::try_from(" Good ")?, Difficulty::Good);
        assert_eq!(Difficulty::try_from("HARD")?, Difficulty::Hard);
        assert!(Difficulty::try_from("medium").is_err());
        Ok(())
    }
}
